use crate::models::options::ProcessOptions;
use crate::models::segment::{Segment, SegmentKind};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that keeps a comment regardless of any other option
pub const KEEP_MARKER: &str = "~keep";

static TODO_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:TODO|FIXME)\b").expect("static regex is valid"));

/// A reason to leave a comment in place when stripping
#[derive(Debug, Clone)]
pub enum PreservationRule {
    KeepMarker,
    Todo,
    Pattern(Regex),
    Documentation,
}

impl PreservationRule {
    pub fn matches(&self, segment: &Segment) -> bool {
        if !segment.is_comment() {
            return false;
        }

        match self {
            PreservationRule::KeepMarker => segment.text.contains(KEEP_MARKER),
            PreservationRule::Todo => TODO_REGEX.is_match(segment.text),
            PreservationRule::Pattern(regex) => regex.is_match(segment.text),
            PreservationRule::Documentation => segment.kind == SegmentKind::DocComment,
        }
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid preserve pattern: {pattern}"))?;
        Ok(PreservationRule::Pattern(regex))
    }

    pub fn pattern_matches(&self, pattern: &str) -> bool {
        match self {
            PreservationRule::Pattern(regex) => regex.as_str() == pattern,
            _ => false,
        }
    }
}

/// The rules in effect for one set of [`ProcessOptions`]
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PreservationRule>,
}

impl RuleSet {
    pub fn from_options(options: &ProcessOptions) -> Result<Self> {
        let mut rules = vec![PreservationRule::KeepMarker];

        if options.preserve_todo {
            rules.push(PreservationRule::Todo);
        }

        if !options.include_doc_comments {
            rules.push(PreservationRule::Documentation);
        }

        for pattern in &options.preserve_patterns {
            rules.push(PreservationRule::pattern(pattern)?);
        }

        Ok(Self { rules })
    }

    pub fn should_preserve(&self, segment: &Segment) -> bool {
        self.rules.iter().any(|rule| rule.matches(segment))
    }

    pub fn rules(&self) -> &[PreservationRule] {
        &self.rules
    }
}
