//! Single-page HTML API reference built with the rule engine
//!
//! Every documented type gets its own rule set: an entry rule that finds the
//! type anywhere in the tree, followed by the section, member, signature and
//! parameter rules. Only the first signature of a method is documented.
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use super::engine::{EngineLimits, Generator, MatchContext, RuleEngine};
use super::format::{format_comment, format_type};
use super::markup::{parent_element, text_element, to_html, GenericElement, Markup};
use super::rule::RuleBuilder;
use crate::error::{Error, Result};
use crate::query::{Flag, Predicate, Selector};
use crate::reflection::{Kind, ReflectionNode, IGNORE_TAG};
use crate::report::{result_class, TestResult, TestResults};
use serde::Serialize;

/// How a documented type is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCategory {
    Class,
    Interface,
    /// An interface whose name ends in `Event`
    Event,
}

/// A class or interface that gets a section on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedType {
    pub name: String,
    pub category: TypeCategory,
}

impl DocumentedType {
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Reflection kind the entry rule searches for
    pub fn kind(&self) -> Kind {
        match self.category {
            TypeCategory::Class => Kind::Class,
            TypeCategory::Interface | TypeCategory::Event => Kind::Interface,
        }
    }

    /// `id` of the type's own section
    pub fn section_id(&self) -> String {
        match self.category {
            TypeCategory::Class => self.name.clone(),
            TypeCategory::Interface => format!("{}-interface", self.name),
            TypeCategory::Event => format!("{}-event", self.name),
        }
    }

    /// Anchor used when another section links to this type
    pub fn link_anchor(&self) -> String {
        match self.category {
            TypeCategory::Class | TypeCategory::Event => self.section_id(),
            TypeCategory::Interface => format!("{}-interface", self.name),
        }
    }
}

/// Front matter written once at the top of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFrontMatter {
    pub layout: String,
    pub sectionid: String,
    pub class: String,
}

impl Default for ApiFrontMatter {
    fn default() -> Self {
        Self {
            layout: "api".to_string(),
            sectionid: "docs".to_string(),
            class: "docs".to_string(),
        }
    }
}

/// Options for [`generate_api_page`]
#[derive(Debug, Clone, Default)]
pub struct ApiPageOptions {
    pub front_matter: ApiFrontMatter,
    pub limits: EngineLimits,
}

/// Every non-ignored class and interface, deduplicated and ordered classes,
/// then plain interfaces, then events, each alphabetically
pub fn documented_types(tree: &ReflectionNode) -> Vec<DocumentedType> {
    let mut classes = Vec::new();
    let mut interfaces = Vec::new();
    collect_types(tree, &mut classes, &mut interfaces);

    classes.sort();
    classes.dedup();
    interfaces.sort();
    interfaces.dedup();

    let (events, plain): (Vec<String>, Vec<String>) =
        interfaces.into_iter().partition(|name| name.ends_with("Event"));

    classes
        .into_iter()
        .map(|name| DocumentedType::new(name, TypeCategory::Class))
        .chain(plain.into_iter().map(|name| DocumentedType::new(name, TypeCategory::Interface)))
        .chain(events.into_iter().map(|name| DocumentedType::new(name, TypeCategory::Event)))
        .collect()
}

fn collect_types(node: &ReflectionNode, classes: &mut Vec<String>, interfaces: &mut Vec<String>) {
    for child in &node.children {
        if child.is_ignored() {
            continue;
        }
        match child.kind {
            Kind::Class => classes.push(child.name.clone()),
            Kind::Interface => interfaces.push(child.name.clone()),
            _ => {}
        }
        collect_types(child, classes, interfaces);
    }
}

/// Generate the complete API page: front matter followed by one fragment per
/// documented type
pub fn generate_api_page(tree: &ReflectionNode, options: &ApiPageOptions) -> Result<String> {
    let documented = documented_types(tree);
    let mut page = front_matter(&options.front_matter)?;

    for ty in &documented {
        let engine = rules_for(ty)?.with_limits(options.limits);
        let generator = ApiPageGenerator {
            current: ty,
            documented: &documented,
        };
        let markup = engine.transform(tree, &generator)?;
        tracing::debug!(name = %ty.name, category = ?ty.category, "Documented type");
        page.push_str(&to_html(&markup));
    }

    Ok(page)
}

fn front_matter(front_matter: &ApiFrontMatter) -> Result<String> {
    let yaml = serde_yaml::to_string(front_matter)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// What a fired rule renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    Entry,
    ClassSection,
    InterfaceSection,
    Member,
    Property,
    Signature,
    Parameter,
}

/// The rule list for one documented type
pub fn rules_for(ty: &DocumentedType) -> Result<RuleEngine<ApiAction>> {
    let rule = |id: &str, selector: Selector, action: ApiAction| {
        RuleBuilder::new(id).selector(selector).action(action).build()
    };
    let visible = |kinds: Predicate| {
        Selector::self_node()
            .filter(kinds)
            .filter(Predicate::not_ignored())
    };

    let rules = vec![
        rule(
            "entry",
            Selector::deep_children()
                .filter(Predicate::kind(ty.kind()))
                .filter(Predicate::name(ty.name.clone()))
                .filter(Predicate::not_ignored())
                .prune(Predicate::Tagged(IGNORE_TAG.to_string())),
            ApiAction::Entry,
        )?,
        rule("class", visible(Predicate::kind(Kind::Class)), ApiAction::ClassSection)?,
        rule(
            "interface",
            visible(Predicate::kind(Kind::Interface)),
            ApiAction::InterfaceSection,
        )?,
        rule(
            "member",
            visible(Predicate::kinds([Kind::Method, Kind::Constructor])),
            ApiAction::Member,
        )?,
        rule("property", visible(Predicate::kind(Kind::Property)), ApiAction::Property)?,
        rule(
            "signature",
            visible(Predicate::kinds([Kind::CallSignature, Kind::ConstructorSignature])),
            ApiAction::Signature,
        )?,
        rule(
            "parameter",
            visible(Predicate::kind(Kind::Parameter)),
            ApiAction::Parameter,
        )?,
    ];

    Ok(RuleEngine::new().add_rules(rules))
}

/// Member category rendered as its own section of a type
struct MemberSection {
    kind: Kind,
    is_static: Option<bool>,
    title: &'static str,
}

impl MemberSection {
    fn selector(&self) -> Selector {
        let selector = Selector::children()
            .filter(Predicate::kind(self.kind.clone()))
            .filter(Predicate::not_ignored());
        match self.is_static {
            Some(expected) => selector.filter(Predicate::flag(Flag::Static, expected)),
            None => selector,
        }
    }
}

struct ApiPageGenerator<'t> {
    current: &'t DocumentedType,
    documented: &'t [DocumentedType],
}

impl<'t> ApiPageGenerator<'t> {
    fn sections(&self) -> Vec<MemberSection> {
        let mut sections = vec![MemberSection {
            kind: Kind::Method,
            is_static: Some(true),
            title: "Static Methods",
        }];
        if self.current.category == TypeCategory::Class {
            sections.push(MemberSection {
                kind: Kind::Constructor,
                is_static: None,
                title: "Constructors",
            });
        }
        sections.push(MemberSection {
            kind: Kind::Property,
            is_static: None,
            title: if self.current.category == TypeCategory::Event {
                "Events"
            } else {
                "Properties"
            },
        });
        sections.push(MemberSection {
            kind: Kind::Method,
            is_static: Some(false),
            title: "Methods",
        });
        sections
    }

    fn type_section(&self, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        let node = matched_node(ctx)?;
        let mut children: Vec<Markup> = vec![
            text_element("h2", node.name.clone()).into(),
            text_element("p", format_comment(node.comment.as_ref())).into(),
        ];

        for section in self.sections() {
            let members = section.selector().select(node)?;
            if members.is_empty() {
                continue;
            }
            children.push(text_element("h3", section.title).into());
            children.push(
                parent_element("section", ctx.runner(Some(&members))?)
                    .attr("class", section.title.to_lowercase())
                    .into(),
            );
        }

        Ok(vec![parent_element("section", children)
            .attr("id", self.current.section_id())
            .attr("class", "docs-title")
            .into()])
    }

    fn member(&self, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        let node = matched_node(ctx)?;
        let body = match node.signatures.first() {
            Some(signature) if signature.is_ignored() => return Ok(Vec::new()),
            Some(signature) => ctx.runner(Some(&[signature]))?,
            None => Vec::new(),
        };
        Ok(vec![parent_element("section", body).attr("class", "method").into()])
    }

    fn property(&self, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        let node = matched_node(ctx)?;
        let mut children: Vec<Markup> =
            vec![text_element("h4", node.name.clone()).attr("class", "property-name").into()];
        if let Some(results) = &node.results {
            children.push(test_results(results).into());
        }
        children.push(text_element("p", format_comment(node.comment.as_ref())).into());

        Ok(vec![parent_element("section", children)
            .attr("class", "property")
            .attr("id", node.name.clone())
            .into()])
    }

    fn signature(&self, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        let node = matched_node(ctx)?;
        let mut children: Vec<Markup> = vec![text_element("h4", node.name.clone())
            .attr("class", "method-name")
            .attr("id", format!("{}-{}", self.current.name, node.name))
            .into()];
        if let Some(results) = &node.results {
            children.push(test_results(results).into());
        }
        children.push(text_element("p", format_comment(node.comment.as_ref())).into());

        let parameters: Vec<&ReflectionNode> =
            node.parameters.iter().filter(|p| !p.is_ignored()).collect();
        if !parameters.is_empty() {
            children.push(text_element("h5", "Arguments").into());
            children.push(parent_element("dl", ctx.runner(Some(&parameters))?).into());
        }

        let returns = node
            .comment
            .as_ref()
            .and_then(|c| c.returns.clone())
            .unwrap_or_default();
        children.push(text_element("h5", "Returns").into());
        children.push(
            parent_element(
                "dl",
                vec![
                    text_element("dt", format_type(node.type_.as_ref(), self.documented))
                        .attr("class", "code return-value")
                        .into(),
                    text_element("dd", returns).into(),
                ],
            )
            .into(),
        );

        Ok(vec![parent_element("section", children).into()])
    }

    fn parameter(&self, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        let node = matched_node(ctx)?;
        Ok(vec![
            text_element(
                "dt",
                format!(
                    "{} [{}]",
                    node.name,
                    format_type(node.type_.as_ref(), self.documented)
                ),
            )
            .attr("class", "code argument")
            .into(),
            text_element("dd", format_comment(node.comment.as_ref())).into(),
        ])
    }
}

impl Generator<ApiAction> for ApiPageGenerator<'_> {
    fn generate(&self, action: &ApiAction, ctx: &MatchContext<'_, ApiAction>) -> Result<Vec<Markup>> {
        match action {
            ApiAction::Entry => ctx.runner(None),
            ApiAction::ClassSection | ApiAction::InterfaceSection => self.type_section(ctx),
            ApiAction::Member => self.member(ctx),
            ApiAction::Property => self.property(ctx),
            ApiAction::Signature => self.signature(ctx),
            ApiAction::Parameter => self.parameter(ctx),
        }
    }
}

fn matched_node<'a>(ctx: &MatchContext<'a, ApiAction>) -> Result<&'a ReflectionNode> {
    ctx.first()
        .ok_or_else(|| Error::transform("Rule fired without a matched node", Some(ctx.rule_id())))
}

fn result_title(title: &str, result: &TestResult) -> Vec<Markup> {
    vec![
        text_element("h5", title).attr("class", "test-result-title").into(),
        text_element("span", format!("{}/{}", result.passed, result.total))
            .attr("class", format!("test-result {}", result_class(result)))
            .into(),
    ]
}

fn result_pip(result: &TestResult) -> Markup {
    text_element("span", "")
        .attr("class", format!("test-pip test-result {}", result_class(result)))
        .into()
}

/// Combined title, one pip per environment and a collapsible breakdown
fn test_results(results: &TestResults) -> GenericElement {
    let environments = [
        ("Electron", results.electron),
        ("OpenFin", results.openfin),
        ("Browser", results.browser),
    ];

    let mut children = result_title("Tests", &results.combined);
    children.extend(environments.iter().filter_map(|(_, r)| r.as_ref().map(result_pip)));

    let breakdown: Vec<Markup> = environments
        .iter()
        .filter_map(|(title, r)| r.as_ref().map(|r| result_title(title, r)))
        .flatten()
        .collect();
    children.push(
        parent_element(
            "section",
            vec![parent_element("section", breakdown)
                .attr("class", "test-content")
                .into()],
        )
        .attr("class", "test-collapsible")
        .into(),
    );

    parent_element("section", children).attr("class", "test-results")
}
