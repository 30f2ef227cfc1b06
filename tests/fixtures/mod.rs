//! Test fixtures: a minimal feature-file reader and outline compiler.
//!
//! Stands in for the upstream parser and compiler so tests can describe
//! documents as text and get realistic locations, ids and artifacts.
#![allow(dead_code)]

use scenario_index::index::build::apply_updates;
use scenario_index::index::document::{walk, NodeRef};
use scenario_index::index::types::*;
use scenario_index::SourceIndex;

/// Process-wide style incrementing id generator
#[derive(Debug, Default)]
pub struct IdGen(u32);

impl IdGen {
    pub fn next_id(&mut self) -> String {
        let id = self.0.to_string();
        self.0 += 1;
        id
    }
}

/// Parses and compiles documents, sharing ids across all of them
#[derive(Debug, Default)]
pub struct Pipeline {
    ids: IdGen,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document update followed by its artifacts, in stream order
    pub fn updates(&mut self, uri: &str, source: &str) -> Vec<Update> {
        let document = self.parse(uri, source);
        let artifacts = self.compile(&document);
        std::iter::once(Update::Document(document))
            .chain(artifacts.into_iter().map(Update::Artifact))
            .collect()
    }

    pub fn parse(&mut self, uri: &str, source: &str) -> SourceDocument {
        let mut feature: Option<Feature> = None;
        let mut in_examples = false;

        for (i, raw) in source.lines().enumerate() {
            let line = i as u32 + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') || text.starts_with('@') {
                continue;
            }
            let column = (raw.len() - raw.trim_start().len()) as u32 + 1;
            let location = Location::new(line, column);

            if let Some(name) = text.strip_prefix("Feature:") {
                feature = Some(Feature {
                    id: None,
                    location: Some(location),
                    name: name.trim().to_string(),
                    children: Vec::new(),
                });
                continue;
            }
            let Some(feature) = feature.as_mut() else {
                continue;
            };

            if let Some(name) = text.strip_prefix("Rule:") {
                in_examples = false;
                feature.children.push(FeatureChild::Rule(Rule {
                    id: self.ids.next_id(),
                    location,
                    name: name.trim().to_string(),
                    children: Vec::new(),
                }));
            } else if let Some(name) = text.strip_prefix("Background:") {
                in_examples = false;
                let background = Background {
                    id: self.ids.next_id(),
                    location,
                    name: name.trim().to_string(),
                    steps: Vec::new(),
                };
                match feature.children.last_mut() {
                    Some(FeatureChild::Rule(rule)) => {
                        rule.children.push(RuleChild::Background(background))
                    }
                    _ => feature.children.push(FeatureChild::Background(background)),
                }
            } else if let Some(name) = strip_any(
                text,
                &["Scenario Outline:", "Scenario Template:", "Scenario:", "Example:"],
            ) {
                in_examples = false;
                let scenario = Scenario {
                    id: self.ids.next_id(),
                    location,
                    name: name.trim().to_string(),
                    steps: Vec::new(),
                    examples: Vec::new(),
                };
                match feature.children.last_mut() {
                    Some(FeatureChild::Rule(rule)) => {
                        rule.children.push(RuleChild::Scenario(scenario))
                    }
                    _ => feature.children.push(FeatureChild::Scenario(scenario)),
                }
            } else if let Some(name) = strip_any(text, &["Examples:", "Scenarios:"]) {
                if let Some(Last::Scenario(scenario)) = last_open(feature) {
                    in_examples = true;
                    scenario.examples.push(Examples {
                        id: self.ids.next_id(),
                        location,
                        name: name.trim().to_string(),
                        table_header: None,
                        table_body: Vec::new(),
                    });
                }
            } else if text.starts_with('|') {
                if !in_examples {
                    continue;
                }
                let row = TableRow {
                    id: self.ids.next_id(),
                    location,
                    cells: text
                        .trim_matches('|')
                        .split('|')
                        .map(|cell| TableCell {
                            value: cell.trim().to_string(),
                        })
                        .collect(),
                };
                if let Some(Last::Scenario(scenario)) = last_open(feature) {
                    if let Some(examples) = scenario.examples.last_mut() {
                        if examples.table_header.is_none() {
                            examples.table_header = Some(row);
                        } else {
                            examples.table_body.push(row);
                        }
                    }
                }
            } else if let Some((keyword, step_text)) = split_step(text) {
                let step = Step {
                    id: self.ids.next_id(),
                    location,
                    keyword: keyword.to_string(),
                    text: step_text.to_string(),
                };
                match last_open(feature) {
                    Some(Last::Background(background)) => background.steps.push(step),
                    Some(Last::Scenario(scenario)) => scenario.steps.push(step),
                    None => {}
                }
            }
        }

        SourceDocument {
            uri: uri.to_string(),
            feature,
        }
    }

    /// Expand scenarios and outlines into artifacts the way the upstream compiler does
    pub fn compile(&mut self, document: &SourceDocument) -> Vec<Artifact> {
        let mut artifacts = Vec::new();
        let Some(feature) = document.feature.as_ref() else {
            return artifacts;
        };

        let mut feature_background: Option<&Background> = None;
        for child in &feature.children {
            match child {
                FeatureChild::Background(b) => feature_background = Some(b),
                FeatureChild::Scenario(s) => {
                    let backgrounds: Vec<&Background> = feature_background.into_iter().collect();
                    self.compile_scenario(&document.uri, &backgrounds, s, &mut artifacts);
                }
                FeatureChild::Rule(rule) => {
                    let mut rule_background: Option<&Background> = None;
                    for rule_child in &rule.children {
                        match rule_child {
                            RuleChild::Background(b) => rule_background = Some(b),
                            RuleChild::Scenario(s) => {
                                let backgrounds: Vec<&Background> = feature_background
                                    .into_iter()
                                    .chain(rule_background)
                                    .collect();
                                self.compile_scenario(
                                    &document.uri,
                                    &backgrounds,
                                    s,
                                    &mut artifacts,
                                );
                            }
                        }
                    }
                }
            }
        }
        artifacts
    }

    fn compile_scenario(
        &mut self,
        uri: &str,
        backgrounds: &[&Background],
        scenario: &Scenario,
        out: &mut Vec<Artifact>,
    ) {
        let background_steps: Vec<&Step> = backgrounds.iter().flat_map(|b| &b.steps).collect();

        if scenario.examples.is_empty() {
            let mut steps = Vec::new();
            for step in background_steps.iter().copied().chain(&scenario.steps) {
                steps.push(self.artifact_step(step, vec![step.id.clone()]));
            }
            out.push(Artifact {
                id: self.ids.next_id(),
                uri: uri.to_string(),
                name: scenario.name.clone(),
                source_node_ids: vec![scenario.id.clone()],
                steps,
            });
            return;
        }

        for examples in &scenario.examples {
            for row in &examples.table_body {
                let mut steps = Vec::new();
                for step in &background_steps {
                    steps.push(self.artifact_step(step, vec![step.id.clone()]));
                }
                for step in &scenario.steps {
                    steps.push(self.artifact_step(step, vec![step.id.clone(), row.id.clone()]));
                }
                out.push(Artifact {
                    id: self.ids.next_id(),
                    uri: uri.to_string(),
                    name: scenario.name.clone(),
                    source_node_ids: vec![scenario.id.clone(), row.id.clone()],
                    steps,
                });
            }
        }
    }

    fn artifact_step(&mut self, step: &Step, source_node_ids: Vec<NodeId>) -> ArtifactStep {
        ArtifactStep {
            id: self.ids.next_id(),
            text: step.text.clone(),
            source_node_ids,
        }
    }
}

/// Parse, compile and index one document
pub fn index_source(uri: &str, source: &str) -> (SourceIndex, SourceDocument) {
    let mut pipeline = Pipeline::new();
    let updates = pipeline.updates(uri, source);
    let document = match updates.first() {
        Some(Update::Document(document)) => document.clone(),
        _ => unreachable!("first update is the document"),
    };
    let mut index = SourceIndex::new();
    apply_updates(&mut index, updates).expect("fixture updates apply cleanly");
    (index, document)
}

pub fn scenario<'a>(document: &'a SourceDocument, name: &str) -> &'a Scenario {
    let mut found = None;
    walk(document, |node| {
        if let NodeRef::Scenario(s) = node {
            if found.is_none() && s.name == name {
                found = Some(s);
            }
        }
    });
    found.unwrap_or_else(|| panic!("no scenario named {:?}", name))
}

pub fn step<'a>(document: &'a SourceDocument, text: &str) -> &'a Step {
    let mut found = None;
    walk(document, |node| {
        if let NodeRef::Step(s) = node {
            if found.is_none() && s.text == text {
                found = Some(s);
            }
        }
    });
    found.unwrap_or_else(|| panic!("no step with text {:?}", text))
}

pub fn ids(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

enum Last<'a> {
    Background(&'a mut Background),
    Scenario(&'a mut Scenario),
}

/// The background or scenario currently accepting steps
fn last_open(feature: &mut Feature) -> Option<Last<'_>> {
    match feature.children.last_mut()? {
        FeatureChild::Background(b) => Some(Last::Background(b)),
        FeatureChild::Scenario(s) => Some(Last::Scenario(s)),
        FeatureChild::Rule(rule) => match rule.children.last_mut()? {
            RuleChild::Background(b) => Some(Last::Background(b)),
            RuleChild::Scenario(s) => Some(Last::Scenario(s)),
        },
    }
}

fn strip_any<'t>(text: &'t str, prefixes: &[&str]) -> Option<&'t str> {
    prefixes.iter().find_map(|p| text.strip_prefix(p))
}

fn split_step(text: &str) -> Option<(&str, &str)> {
    ["Given ", "When ", "Then ", "And ", "But ", "* "]
        .iter()
        .find_map(|keyword| text.strip_prefix(keyword).map(|rest| (*keyword, rest.trim())))
}
