//! Rule evaluation
//!
//! A [`Rule`] is a filter deciding whether it applies to a cell, paired with
//! an outcome computing the cell's next state from its neighbours. Rules never
//! look at the world themselves: the generator hands them the coordinate, the
//! cell's current liveness and its neighbour summary.

use super::cell::NeighbourSummary;
use super::coord::Coord;
use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type RuleFilter = Box<dyn Fn(Coord, bool) -> bool + Send + Sync>;
type RuleOutcome = Box<dyn Fn(&NeighbourSummary, Coord) -> bool + Send + Sync>;

/// One (filter, outcome) pair
pub struct Rule {
    name: String,
    filter: RuleFilter,
    outcome: RuleOutcome,
}

impl Rule {
    pub fn new<F, O>(name: impl Into<String>, filter: F, outcome: O) -> Self
    where
        F: Fn(Coord, bool) -> bool + Send + Sync + 'static,
        O: Fn(&NeighbourSummary, Coord) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            filter: Box::new(filter),
            outcome: Box::new(outcome),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this rule decides the fate of the cell
    pub fn applies(&self, coord: Coord, live: bool) -> bool {
        (self.filter)(coord, live)
    }

    /// Next state of the cell
    pub fn apply(&self, coord: Coord, neighbours: &NeighbourSummary) -> bool {
        (self.outcome)(neighbours, coord)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Ordered rules; the first one whose filter matches wins
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Standard Conway rules (B3/S23)
    pub fn conway() -> Self {
        LifeRule::conway().into()
    }

    /// Birth/survival rules from neighbour counts
    pub fn life_like(birth: &[u8], survival: &[u8]) -> LifeResult<Self> {
        Ok(LifeRule::new(birth, survival)?.into())
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Next state of a cell. Cells no rule applies to die.
    pub fn evaluate(&self, coord: Coord, live: bool, neighbours: &NeighbourSummary) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.applies(coord, live))
            .map(|rule| rule.apply(coord, neighbours))
            .unwrap_or(false)
    }
}

impl FromStr for RuleSet {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<LifeRule>()?.into())
    }
}

/// Outer-totalistic Moore rule stored as neighbour-count bitmasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LifeRule {
    birth: u16,
    survival: u16,
}

impl LifeRule {
    pub fn new(birth: &[u8], survival: &[u8]) -> LifeResult<Self> {
        Self {
            birth: Self::mask(birth)?,
            survival: Self::mask(survival)?,
        }
        .checked()
    }

    pub fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survival: (1 << 2) | (1 << 3),
        }
    }

    fn mask(counts: &[u8]) -> LifeResult<u16> {
        counts.iter().try_fold(0u16, |mask, &count| {
            if count > Self::max_neighbor_count() {
                Err(LifeError::InvalidRule(format!(
                    "neighbour count {} is not in 0..=8",
                    count
                )))
            } else {
                Ok(mask | (1 << count))
            }
        })
    }

    // Birth from zero neighbours would bring every isolated dead cell to
    // life, which the sparse frontier cannot represent.
    fn checked(self) -> LifeResult<Self> {
        if self.birth & 1 != 0 {
            return Err(LifeError::InvalidRule("B0 rules are not supported".to_string()));
        }
        Ok(self)
    }

    /// Check if a cell should be alive in the next generation
    pub fn should_be_alive(&self, current_state: bool, neighbor_count: u8) -> bool {
        let mask = if current_state { self.survival } else { self.birth };
        neighbor_count <= Self::max_neighbor_count() && mask & (1 << neighbor_count) != 0
    }

    /// Neighbour counts that bring a dead cell to life
    pub fn birth_counts(&self) -> Vec<u8> {
        Self::counts(self.birth)
    }

    /// Neighbour counts that keep a live cell alive
    pub fn survival_counts(&self) -> Vec<u8> {
        Self::counts(self.survival)
    }

    fn counts(mask: u16) -> Vec<u8> {
        (0..=Self::max_neighbor_count())
            .filter(|&n| mask & (1 << n) != 0)
            .collect()
    }

    /// Maximum 8 neighbors in Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }

    /// Two ordered rules: birth for dead cells, survival for live ones
    pub fn to_rules(self) -> Vec<Rule> {
        vec![
            Rule::new(
                "birth",
                |_, live| !live,
                move |neighbours: &NeighbourSummary, _| {
                    self.should_be_alive(false, neighbours.live_count())
                },
            ),
            Rule::new(
                "survival",
                |_, live| live,
                move |neighbours: &NeighbourSummary, _| {
                    self.should_be_alive(true, neighbours.live_count())
                },
            ),
        ]
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::conway()
    }
}

impl From<LifeRule> for RuleSet {
    fn from(rule: LifeRule) -> Self {
        RuleSet::new(rule.to_rules())
    }
}

fn parse_digits(part: &str, rulestring: &str) -> LifeResult<Vec<u8>> {
    part.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| {
                    LifeError::InvalidRule(format!("unexpected '{}' in \"{}\"", c, rulestring))
                })
        })
        .collect()
}

impl FromStr for LifeRule {
    type Err = LifeError;

    /// Accepts `B3/S23` (either order, any case) and the legacy `23/3`
    /// survival/birth notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rulestring = s.trim();
        let parts: Vec<&str> = rulestring.split('/').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(LifeError::InvalidRule(format!(
                "\"{}\" must have exactly one '/'",
                rulestring
            )));
        }

        let mut birth = None;
        let mut survival = None;

        for part in &parts {
            let mut chars = part.chars();
            match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => birth = Some(parse_digits(chars.as_str(), rulestring)?),
                Some('S') => survival = Some(parse_digits(chars.as_str(), rulestring)?),
                _ => {}
            }
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Self::new(&birth, &survival),
            (None, None) => {
                let survival = parse_digits(parts[0], rulestring)?;
                let birth = parse_digits(parts[1], rulestring)?;
                Self::new(&birth, &survival)
            }
            _ => Err(LifeError::InvalidRule(format!(
                "\"{}\" needs both a B and an S part",
                rulestring
            ))),
        }
    }
}

impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |counts: Vec<u8>| counts.iter().map(u8::to_string).collect::<String>();
        write!(
            f,
            "B{}/S{}",
            digits(self.birth_counts()),
            digits(self.survival_counts())
        )
    }
}

impl TryFrom<String> for LifeRule {
    type Error = LifeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LifeRule> for String {
    fn from(rule: LifeRule) -> Self {
        rule.to_string()
    }
}
