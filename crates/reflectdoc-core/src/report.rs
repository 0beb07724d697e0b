//! Test report loading and merging
//!
//! The test report maps a dotted member path (`"ssf.Window.focus"`) to pass
//! counts for each target environment. Before the API page is generated the
//! report is merged into the reflection tree so that rules can render results
//! straight from the matched node.

use crate::reflection::{Kind, ReflectionNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Boundaries used to derive the `test-color-*` CSS class
pub const CLASS_BOUNDARIES: [u32; 6] = [0, 10, 25, 50, 75, 100];

/// Breakpoints and colours used for shields.io badges
pub const BADGE_BREAKPOINTS: [(u32, BadgeColor); 5] = [
    (10, BadgeColor::Red),
    (25, BadgeColor::Yellow),
    (50, BadgeColor::YellowGreen),
    (75, BadgeColor::Green),
    (100, BadgeColor::BrightGreen),
];

/// Pass counts for a single environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub passed: u64,
    #[serde(default)]
    pub total: u64,
}

impl TestResult {
    pub fn new(passed: u64, total: u64) -> Self {
        Self { passed, total }
    }
}

/// The three environments the test matrix runs against, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Electron,
    OpenFin,
    Browser,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Electron,
        Environment::OpenFin,
        Environment::Browser,
    ];

    /// Human-readable label used in badges and result titles
    pub fn label(self) -> &'static str {
        match self {
            Environment::Electron => "Electron",
            Environment::OpenFin => "OpenFin",
            Environment::Browser => "Browser",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One report entry: results per environment, any of which may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentResults {
    pub electron: Option<TestResult>,
    pub openfin: Option<TestResult>,
    pub browser: Option<TestResult>,
}

impl EnvironmentResults {
    /// Results for one environment
    pub fn get(&self, environment: Environment) -> Option<TestResult> {
        match environment {
            Environment::Electron => self.electron,
            Environment::OpenFin => self.openfin,
            Environment::Browser => self.browser,
        }
    }

    /// Sum across all environments; a missing environment counts as 0/0
    pub fn combined(&self) -> TestResult {
        Environment::ALL
            .iter()
            .filter_map(|env| self.get(*env))
            .fold(TestResult::default(), |acc, r| {
                TestResult::new(
                    acc.passed.saturating_add(r.passed),
                    acc.total.saturating_add(r.total),
                )
            })
    }
}

/// Results attached to a reflection node by [`merge_report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestResults {
    pub combined: TestResult,
    pub electron: Option<TestResult>,
    pub openfin: Option<TestResult>,
    pub browser: Option<TestResult>,
}

impl TestResults {
    pub fn get(&self, environment: Environment) -> Option<TestResult> {
        match environment {
            Environment::Electron => self.electron,
            Environment::OpenFin => self.openfin,
            Environment::Browser => self.browser,
        }
    }
}

impl From<&EnvironmentResults> for TestResults {
    fn from(entry: &EnvironmentResults) -> Self {
        Self {
            combined: entry.combined(),
            electron: entry.electron,
            openfin: entry.openfin,
            browser: entry.browser,
        }
    }
}

/// Flattened test report keyed by dotted member path
pub type TestReport = BTreeMap<String, EnvironmentResults>;

/// A report key split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportKey<'a> {
    pub namespace: &'a str,
    pub type_name: &'a str,
    pub member: Option<&'a str>,
}

impl<'a> ReportKey<'a> {
    /// Split `"ns.Type.member"`, `"ns.Type"` or `"ns.Type()"`; segments
    /// past the member are dropped
    pub fn parse(key: &'a str) -> Self {
        let mut parts = key.split('.');
        let namespace = parts.next().unwrap_or_default();
        let type_name = parts.next().unwrap_or_default();
        let member = parts.next().filter(|m| !m.is_empty());
        let type_name = match member {
            None => type_name.strip_suffix("()").unwrap_or(type_name),
            Some(_) => type_name,
        };
        Self {
            namespace,
            type_name,
            member,
        }
    }
}

/// Outcome of merging a report into a reflection tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of entries attached to a node
    pub attached: usize,
    /// Keys that matched no method, property or constructor
    pub unmatched: Vec<String>,
}

/// Load a test report; a missing or malformed report is not fatal
pub fn load_report(path: &Path) -> Option<TestReport> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Could not find test report, generating documentation without test data"
        );
        return None;
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str::<TestReport>(&content).map_err(|e| e.to_string()));

    match parsed {
        Ok(report) => {
            tracing::debug!(path = %path.display(), entries = report.len(), "Loaded test report");
            Some(report)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Could not read test report, generating documentation without test data"
            );
            None
        }
    }
}

/// Attach every report entry to the matching node of the tree.
///
/// Lookup order is method, then property, then constructor; the first hit
/// wins. Method and constructor results are also mirrored onto the first
/// signature, which is what the signature rule renders.
pub fn merge_report(tree: &mut ReflectionNode, report: &TestReport) -> MergeSummary {
    let mut summary = MergeSummary::default();

    for (key, entry) in report {
        let parsed = ReportKey::parse(key);
        let results = TestResults::from(entry);

        let located = parsed
            .member
            .and_then(|member| {
                locate_member(tree, parsed.type_name, &Kind::Method, Some(member))
                    .map(|path| (path, true))
                    .or_else(|| {
                        locate_member(tree, parsed.type_name, &Kind::Property, Some(member))
                            .map(|path| (path, false))
                    })
            })
            .or_else(|| match parsed.member {
                None => locate_member(tree, parsed.type_name, &Kind::Constructor, None)
                    .map(|path| (path, true)),
                Some(_) => None,
            });

        let target = match located {
            Some((path, has_signatures)) => {
                node_at_mut(tree, &path).map(|node| (node, has_signatures))
            }
            None => None,
        };

        match target {
            Some((node, has_signatures)) => {
                node.results = Some(results);
                if has_signatures {
                    if let Some(signature) = node.signatures.first_mut() {
                        signature.results = Some(results);
                    }
                }
                summary.attached += 1;
            }
            None => {
                tracing::warn!(key = %key, "unable to find {} within the type documentation", key);
                summary.unmatched.push(key.clone());
            }
        }
    }

    summary
}

/// Index path (through `children`) of the first member of `kind` named
/// `member` inside any class or interface named `type_name`
fn locate_member(
    tree: &ReflectionNode,
    type_name: &str,
    kind: &Kind,
    member: Option<&str>,
) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    locate_in(tree, type_name, kind, member, &mut path).then_some(path)
}

fn locate_in(
    node: &ReflectionNode,
    type_name: &str,
    kind: &Kind,
    member: Option<&str>,
    path: &mut Vec<usize>,
) -> bool {
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        let is_owner =
            matches!(child.kind, Kind::Class | Kind::Interface) && child.name == type_name;
        if is_owner {
            let hit = child
                .children
                .iter()
                .position(|m| &m.kind == kind && member.map_or(true, |name| m.name == name));
            if let Some(position) = hit {
                path.push(position);
                return true;
            }
        }
        if locate_in(child, type_name, kind, member, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn node_at_mut<'a>(tree: &'a mut ReflectionNode, path: &[usize]) -> Option<&'a mut ReflectionNode> {
    path.iter()
        .try_fold(tree, |node, index| node.children.get_mut(*index))
}

/// Rounded pass percentage, `None` when nothing ran
pub fn pass_percentage(result: &TestResult) -> Option<u32> {
    if result.total == 0 {
        return None;
    }
    let ratio = result.passed as f64 / result.total as f64;
    Some((ratio * 100.0).round() as u32)
}

/// CSS class for a result: `test-color-<B>` for the largest boundary B not
/// above the rounded percentage, empty when nothing ran
pub fn result_class(result: &TestResult) -> String {
    match pass_percentage(result) {
        Some(percentage) => {
            let boundary = CLASS_BOUNDARIES
                .iter()
                .rev()
                .find(|b| **b <= percentage)
                .copied()
                .unwrap_or(0);
            format!("test-color-{}", boundary)
        }
        None => String::new(),
    }
}

/// shields.io badge colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Red,
    Yellow,
    YellowGreen,
    Green,
    BrightGreen,
    LightGrey,
}

impl BadgeColor {
    /// Colour for a result: lightgrey when nothing ran, otherwise the colour
    /// of the largest breakpoint not above the percentage (red below 10)
    pub fn for_result(result: &TestResult) -> Self {
        match pass_percentage(result) {
            None => BadgeColor::LightGrey,
            Some(percentage) => BADGE_BREAKPOINTS
                .iter()
                .rev()
                .find(|(breakpoint, _)| *breakpoint <= percentage)
                .map(|(_, color)| *color)
                .unwrap_or(BadgeColor::Red),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Red => "red",
            BadgeColor::Yellow => "yellow",
            BadgeColor::YellowGreen => "yellowgreen",
            BadgeColor::Green => "green",
            BadgeColor::BrightGreen => "brightgreen",
            BadgeColor::LightGrey => "lightgrey",
        }
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
