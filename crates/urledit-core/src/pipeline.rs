//! Per-(URL, variant) processing pass.
//!
//! One pass runs parse → redirect → set → path append → query extract /
//! append / trim / rebuild → render, and returns the rendered text. The
//! caller decides where it goes; a skipped URL (parse failure without
//! `--verify`) returns nothing.

use crate::component::{Component, NUM_COMPONENTS};
use crate::diag;
use crate::engine::{EngineError, GetOpts, ParseOpts, UrlHandle};
use crate::error::Error;
use crate::format;
use crate::qpairs::QueryPairs;
use crate::variant::Variant;
use serde::Serialize;

/// JSON rendering of one URL; field declaration order is the canonical
/// component order, absent components are left out.
#[derive(Debug, Serialize)]
struct ComponentsJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zoneid: Option<String>,
}

/// Run one full pass for `url` under `variant`.
///
/// Returns the rendered output, or `None` when the URL was skipped (parse
/// failure without `--verify`). Fatal conditions become `Error` values.
/// With no URL at all, the pass starts from an empty handle and works with
/// whatever the `set` directives provide.
pub fn process(variant: &mut Variant, url: Option<&str>) -> Result<Option<String>, Error> {
    let mut handle = match url {
        Some(text) => {
            let opts = ParseOpts {
                guess_scheme: true,
                accept_space: variant.accept_space,
            };
            match UrlHandle::parse(text, opts) {
                Ok(handle) => handle,
                Err(e) => return parse_failure(variant, &e, text),
            }
        }
        None => UrlHandle::new(),
    };

    // A redirect only applies when there was an original URL to redirect.
    if url.is_some() {
        if let Some(redirect) = variant.redirect.as_deref() {
            let opts = ParseOpts {
                guess_scheme: true,
                accept_space: false,
            };
            match UrlHandle::parse(redirect, opts) {
                Ok(redirected) => handle = redirected,
                Err(e) => return parse_failure(variant, &e, redirect),
            }
        }
    }

    apply_sets(&mut handle, variant)?;
    append_path_segments(&mut handle, variant);
    apply_query(&mut handle, variant)?;

    let rendered = if variant.json {
        render_json(&handle, variant.urls == 0)
    } else if let Some(template) = variant.format.as_deref() {
        format::render(template, &handle)
    } else {
        match handle.get(Component::Url, GetOpts::default()) {
            Ok(Some(full)) => format!("{full}\n"),
            _ => return Err(Error::Url("not enough input for a URL".to_string())),
        }
    };
    variant.urls += 1;
    Ok(Some(rendered))
}

fn parse_failure(
    variant: &Variant,
    err: &EngineError,
    text: &str,
) -> Result<Option<String>, Error> {
    if variant.verify {
        return Err(Error::BadUrl(format!("{err} [{text}]")));
    }
    diag::note(&format!("{err} [{text}]"));
    Ok(None)
}

/// Apply every `set` directive in list order, at most once per component.
fn apply_sets(handle: &mut UrlHandle, variant: &Variant) -> Result<(), Error> {
    let mut seen = [false; NUM_COMPONENTS];
    for directive in &variant.set_list {
        let (component, value, encode) = split_set(directive)?;
        if seen[component.index()] {
            return Err(Error::Set(format!(
                "A component can only be set once per URL ({component})"
            )));
        }
        seen[component.index()] = true;
        if let Err(e) = handle.set(component, value, encode) {
            // Engine-level rejects (bad port number, bad scheme) leave the
            // component as it was.
            tracing::debug!("set {component} rejected: {e}");
        }
    }
    Ok(())
}

/// Split `component=value`; a `:` before the `=` disables encoding, an
/// empty value clears the component.
fn split_set(directive: &str) -> Result<(Component, Option<&str>, bool), Error> {
    let Some((name, value)) = directive.split_once('=') else {
        return Err(Error::Set(format!("invalid --set syntax: {directive}")));
    };
    if name.is_empty() {
        return Err(Error::Set(format!("invalid --set syntax: {directive}")));
    }
    let (name, encode) = match name.strip_suffix(':') {
        Some(stripped) => (stripped, false),
        None => (name, true),
    };
    let Some(component) = Component::from_name(name) else {
        return Err(Error::Set(format!("Set unknown component: {directive}")));
    };
    Ok((component, (!value.is_empty()).then_some(value), encode))
}

/// Append queued (already encoded) path segments, one at a time.
fn append_path_segments(handle: &mut UrlHandle, variant: &Variant) {
    for segment in &variant.append_path {
        let current = handle
            .get(Component::Path, GetOpts::default())
            .ok()
            .flatten()
            .unwrap_or_default();
        let path = if current.ends_with('/') {
            format!("{current}{segment}")
        } else {
            format!("{current}/{segment}")
        };
        handle.set(Component::Path, Some(&path), false).ok();
    }
}

/// Run the query pair lifecycle scoped to this pass.
fn apply_query(handle: &mut UrlHandle, variant: &Variant) -> Result<(), Error> {
    let mut pairs = match handle.get(Component::Query, GetOpts::default()) {
        Ok(Some(query)) => QueryPairs::extract(&query),
        _ => QueryPairs::new(),
    };
    for pair in &variant.append_query {
        pairs.push(pair);
    }
    for directive in &variant.trim_list {
        pairs.trim(directive)?;
    }
    if pairs.is_empty() {
        return Ok(());
    }
    match pairs.rebuild() {
        Some(query) => {
            if handle.set(Component::Query, Some(&query), false).is_err() {
                diag::note("internal problem");
            }
        }
        // Every pair tombstoned: clear the component so no bare `?` is left.
        None => {
            handle.set(Component::Query, None, false).ok();
        }
    }
    Ok(())
}

/// JSON object for one URL: decoded component values in canonical order,
/// indented to sit inside the top-level array. `first` controls the comma
/// in front of this variant's output stream.
fn render_json(handle: &UrlHandle, first: bool) -> String {
    let fetch = |component: Component| {
        let opts = GetOpts {
            decode: component != Component::Url,
            default_port: component != Component::Url,
        };
        handle.get(component, opts).ok().flatten()
    };
    let object = ComponentsJson {
        url: fetch(Component::Url),
        scheme: fetch(Component::Scheme),
        user: fetch(Component::User),
        password: fetch(Component::Password),
        options: fetch(Component::Options),
        host: fetch(Component::Host),
        port: fetch(Component::Port),
        path: fetch(Component::Path),
        query: fetch(Component::Query),
        fragment: fetch(Component::Fragment),
        zoneid: fetch(Component::Zoneid),
    };
    let body = serde_json::to_string_pretty(&object).unwrap_or_else(|_| String::from("{}"));
    let indented = body
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    if first {
        indented
    } else {
        format!(",\n{indented}")
    }
}
