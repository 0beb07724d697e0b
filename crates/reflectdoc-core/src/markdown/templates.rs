//! Markdown and HTML templates for the per-type documentation site
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use crate::report::{BadgeColor, Environment, TestResult};

const SHIELDS_URL: &str = "https://img.shields.io/badge";

/// Templates for the generated pages
pub struct Template;

impl Template {
    /// Front matter block at the top of every `<key>.md` page
    pub fn page_header(key: &str) -> String {
        format!(
            "---  \nid: {key}Api\ntitle: {key} Api\npermalink: docs/{key}.html\nlayout: docs\nsectionid: docs\n---  \n\n",
            key = key
        )
    }

    /// The `docs.html` navigation page: one entry per document plus the
    /// test matrix, wrapped in the site layout
    pub fn navigation_page<'a, I>(keys: I, link_prefix: &str) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut result = String::from("---\nlayout: default\nsectionid: docs\n---\n\n");
        result.push_str("<section class=\"content row mr-0 ml-0\">\n<div class=\"list-group col-3\">\n");

        for key in keys {
            result.push_str(&Self::navigation_link(
                &format!("{}Api", key),
                &format!("{}/{}", link_prefix, key),
                &format!("{} API", key),
            ));
            result.push('\n');
        }
        result.push_str(&Self::navigation_link(
            "testMatrix",
            &format!("{}/test-matrix", link_prefix),
            "Test Matrix",
        ));
        result.push('\n');

        result.push_str("</div>\n<div class=\"doc-body pl-2 pt-2 col-9\">\n{{ content }}\n</div>\n</section>");
        result
    }

    fn navigation_link(page_id: &str, href: &str, text: &str) -> String {
        format!(
            "<a {{% if page.id == '{}' %}} class=\"list-group-item active\" {{% else %}} class=\"list-group-item\" {{% endif %}} href=\"{}\">{}</a>",
            page_id, href, text
        )
    }

    /// shields.io badge for one environment; `None` renders `no_test_data`
    pub fn badge(name: &str, environment: Environment, result: Option<&TestResult>) -> String {
        match result {
            Some(result) => format!(
                "![{}]({}/{}-{}%2F{}-{}.svg)",
                name,
                SHIELDS_URL,
                environment.label(),
                result.passed,
                result.total,
                BadgeColor::for_result(result)
            ),
            None => format!(
                "![{}]({}/{}-no_test_data-{}.svg)",
                name,
                SHIELDS_URL,
                environment.label(),
                BadgeColor::LightGrey
            ),
        }
    }

    /// Badge set used when the report has no entry for a member
    pub fn default_badges(name: &str) -> String {
        Environment::ALL
            .iter()
            .map(|env| Self::badge(name, *env, None))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Badge set for a report entry, one per environment in display order
    pub fn result_badges<F>(name: &str, lookup: F) -> String
    where
        F: Fn(Environment) -> Option<TestResult>,
    {
        Environment::ALL
            .iter()
            .map(|env| format!("{} ", Self::badge(name, *env, lookup(*env).as_ref())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
