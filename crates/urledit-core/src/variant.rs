//! Per-pass configuration records and iteration expansion.

use crate::component::Component;
use crate::error::Error;

/// One fully configured processing pass.
///
/// A chain holds one or more of these. All passes share the same append,
/// trim and output settings; they differ only in their `set` directives
/// and each one's private rendered-URL counter.
#[derive(Debug, Clone, Default)]
pub struct Variant {
    /// Percent-encoded path segments queued by `--append path=`.
    pub append_path: Vec<String>,
    /// Percent-encoded query pairs queued by `--append query=`.
    pub append_query: Vec<String>,
    /// Raw `component=value` / `component:=value` directives, in flag order.
    pub set_list: Vec<String>,
    /// Raw `component=pattern` trim directives, in flag order.
    pub trim_list: Vec<String>,
    /// Replacement URL applied after a successful parse.
    pub redirect: Option<String>,
    /// Custom output format; `None` selects JSON or the full-URL default.
    pub format: Option<String>,
    pub json: bool,
    pub verify: bool,
    pub accept_space: bool,
    /// URLs rendered by this variant so far (drives JSON comma placement).
    pub urls: u32,
}

/// Ordered chain of variants; built once, before any URL is processed.
#[derive(Debug)]
pub struct VariantChain {
    variants: Vec<Variant>,
}

impl VariantChain {
    /// Chain of exactly one variant (no iteration).
    pub fn single(base: Variant) -> Self {
        VariantChain {
            variants: vec![base],
        }
    }

    /// Expand `base` over an iteration directive into one variant per token.
    ///
    /// `directive` looks like `hosts=a b c`: the plural prefix picks the
    /// component, the space-separated tokens supply one value per variant.
    /// The first token extends `base`'s own set list; every further token
    /// gets a clone whose set list restarts from the pre-expansion
    /// snapshot, so each variant carries exactly one iterated assignment.
    pub fn expand(mut base: Variant, directive: &str) -> Result<Self, Error> {
        const PREFIXES: [(&str, Component); 3] = [
            ("hosts=", Component::Host),
            ("ports=", Component::Port),
            ("schemes=", Component::Scheme),
        ];
        let bad = || Error::Iterate(format!("Missing arguments for iterator {directive}"));

        let Some((rest, component)) = PREFIXES
            .iter()
            .find_map(|(prefix, c)| directive.strip_prefix(prefix).map(|rest| (rest, *c)))
        else {
            return Err(bad());
        };
        if rest.is_empty() {
            return Err(bad());
        }
        let tokens: Vec<&str> = rest.split(' ').collect();
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(bad());
        }

        let snapshot = base.set_list.clone();
        let mut variants: Vec<Variant> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let assignment = format!("{}={}", component.name(), token);
            if i == 0 {
                base.set_list.push(assignment);
            } else {
                let mut variant = base.clone();
                variant.set_list = snapshot.clone();
                variant.set_list.push(assignment);
                variants.push(variant);
            }
        }
        variants.insert(0, base);
        Ok(VariantChain { variants })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in chain order, mutably (pipeline passes bump counters).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Variant> {
        self.variants.iter_mut()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}
