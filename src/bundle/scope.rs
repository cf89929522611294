//! Scope hierarchy.
//!
//! A scope contributes its own bundles and, optionally, a language; anything
//! it does not declare comes from its parent. Scopes live in a [`ScopeTree`]
//! arena and refer to their parent by [`ScopeId`]. Effective bundles and the
//! active language are fixed when a scope is entered.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::merge::merge;
use super::resolver::{
    resolve,
    resolve_language,
};
use crate::config::{
    I18nSettings,
    load_settings,
};
use crate::error::I18nError;
use crate::input::tree::{
    BundleTreeSet,
    flatten,
};
use crate::markup::MarkupRule;
use crate::resolve::{
    I18nProp,
    KeyedRequest,
    ResolvedOutput,
    ValueResolver,
};
use crate::types::{
    BundleSet,
    LanguageBundle,
};

/// Index of a scope in its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a scope declares for itself.
#[derive(Debug, Clone, Default)]
pub struct ScopeConfig {
    pub bundles: BundleTreeSet,
    pub lang: Option<String>,
    /// `None` uses the rules from settings.
    pub markup_rules: Option<Vec<MarkupRule>>,
}

impl ScopeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bundles(mut self, bundles: BundleTreeSet) -> Self {
        self.bundles = bundles;
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn markup_rules(mut self, rules: Vec<MarkupRule>) -> Self {
        self.markup_rules = Some(rules);
        self
    }
}

/// Values a new scope reads from its nearest ancestor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inherited<'a> {
    pub bundles: Option<&'a BundleSet>,
    pub lang: Option<&'a str>,
}

/// One entered scope.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    parent: Option<ScopeId>,
    own: BundleSet,
    declared_lang: Option<String>,
    lang: String,
    effective: BundleSet,
    rules: Arc<[MarkupRule]>,
}

impl ScopeNode {
    /// Enter a scope below whatever `inherited` describes.
    ///
    /// # Errors
    /// - [`I18nError::MissingLanguage`] if neither the config nor `inherited` has a language
    /// - [`I18nError::UnknownLanguage`] if the merged bundles lack that language
    pub fn enter(
        config: ScopeConfig,
        inherited: Inherited<'_>,
        settings: &I18nSettings,
    ) -> Result<Self, I18nError> {
        let own: BundleSet = config
            .bundles
            .iter()
            .map(|(lang, tree)| (lang.clone(), flatten(tree, &settings.key_separator)))
            .collect();

        let effective = match inherited.bundles {
            Some(parent) => merge(&own, parent),
            None => own.clone(),
        };

        let declared_lang = config.lang.filter(|declared| !declared.is_empty());
        let lang = resolve_language(declared_lang.as_deref(), inherited.lang)?.to_string();
        resolve(&effective, Some(&lang))?;

        let rules: Arc<[MarkupRule]> =
            config.markup_rules.unwrap_or_else(|| settings.markup_rules()).into();

        tracing::debug!(
            "Entered scope: lang={} ({}), languages={}, own keys={}",
            lang,
            if declared_lang.is_some() { "declared" } else { "inherited" },
            effective.len(),
            own.values().map(HashMap::len).sum::<usize>()
        );

        Ok(Self { parent: None, own, declared_lang, lang, effective, rules })
    }

    /// What a child scope inherits from this one.
    #[must_use]
    pub fn inherited(&self) -> Inherited<'_> {
        Inherited { bundles: Some(&self.effective), lang: Some(&self.lang) }
    }

    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Active language (declared here or inherited).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.lang
    }

    /// Language this scope declares itself; an empty tag counts as none.
    #[must_use]
    pub fn declared_language(&self) -> Option<&str> {
        self.declared_lang.as_deref()
    }

    /// This scope's own flattened bundles, before merging.
    #[must_use]
    pub const fn own_bundles(&self) -> &BundleSet {
        &self.own
    }

    /// Merged bundles for every known language.
    #[must_use]
    pub const fn bundles(&self) -> &BundleSet {
        &self.effective
    }

    /// Flat bundle of the active language.
    ///
    /// # Errors
    /// Cannot fail for a scope built by [`ScopeNode::enter`]; kept fallible
    /// because it goes through the same resolution as entry.
    pub fn bundle(&self) -> Result<&LanguageBundle, I18nError> {
        resolve(&self.effective, Some(&self.lang))
    }

    #[must_use]
    pub fn markup_rules(&self) -> &[MarkupRule] {
        &self.rules
    }

    /// Resolve requests against the active language.
    ///
    /// # Errors
    /// Propagates resolution and markup errors.
    pub fn resolve_all(
        &self,
        requests: &[KeyedRequest],
        content_property: &str,
    ) -> Result<Vec<(String, ResolvedOutput)>, I18nError> {
        let resolver = ValueResolver::new(self.bundle()?, &self.rules, content_property);
        Ok(resolver.resolve_all(requests)?)
    }
}

/// Arena of scopes.
///
/// Slots are never reused: once a scope is exited its [`ScopeId`] stays
/// dead, and every later scope gets a fresh index.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    settings: I18nSettings,
    nodes: Vec<Option<ScopeNode>>,
}

impl ScopeTree {
    #[must_use]
    pub const fn new(settings: I18nSettings) -> Self {
        Self { settings, nodes: Vec::new() }
    }

    /// Build a tree from the `.scoped-i18n.json` in `root`, or defaults if there is none.
    ///
    /// # Errors
    /// [`I18nError::Config`] if the file cannot be read, parsed or validated.
    pub fn from_config_dir(root: &Path) -> Result<Self, I18nError> {
        Ok(Self::new(load_settings(root)?))
    }

    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// Enter a scope with no parent.
    ///
    /// # Errors
    /// See [`ScopeNode::enter`].
    pub fn enter_root(&mut self, config: ScopeConfig) -> Result<ScopeId, I18nError> {
        let node = ScopeNode::enter(config, Inherited::default(), &self.settings)?;
        Ok(self.push(node))
    }

    /// Enter a scope below `parent`.
    ///
    /// # Errors
    /// [`I18nError::UnknownScope`] for an exited id, otherwise see [`ScopeNode::enter`].
    pub fn enter(&mut self, parent: ScopeId, config: ScopeConfig) -> Result<ScopeId, I18nError> {
        let inherited = self.get(parent)?.inherited();
        let mut node = ScopeNode::enter(config, inherited, &self.settings)?;
        node.parent = Some(parent);
        Ok(self.push(node))
    }

    /// Exit `id`, discarding it and its descendants. Siblings stay live.
    ///
    /// Returns the number of scopes discarded; `0` if `id` was already gone.
    pub fn exit(&mut self, id: ScopeId) -> usize {
        let Some(slot) = self.nodes.get_mut(id.0) else {
            return 0;
        };
        if slot.take().is_none() {
            return 0;
        }

        // Children are always pushed after their parent, so one forward pass
        // sees every ancestor's slot already cleared.
        let mut discarded = 1;
        for index in id.0 + 1..self.nodes.len() {
            let orphaned = self
                .nodes
                .get(index)
                .and_then(Option::as_ref)
                .and_then(ScopeNode::parent)
                .is_some_and(|parent| self.nodes.get(parent.0).is_some_and(Option::is_none));
            if orphaned && let Some(slot) = self.nodes.get_mut(index) {
                *slot = None;
                discarded += 1;
            }
        }

        tracing::debug!("Exited scope {}: discarded {} scope(s)", id.0, discarded);
        discarded
    }

    /// # Errors
    /// [`I18nError::UnknownScope`] if `id` was exited or belongs to another tree.
    pub fn get(&self, id: ScopeId) -> Result<&ScopeNode, I18nError> {
        self.nodes.get(id.0).and_then(Option::as_ref).ok_or(I18nError::UnknownScope(id.0))
    }

    /// Number of live scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve requests in scope `id`.
    ///
    /// # Errors
    /// Unknown scope, or markup errors from the scope's rules.
    pub fn resolve_all(
        &self,
        id: ScopeId,
        requests: &[KeyedRequest],
    ) -> Result<Vec<(String, ResolvedOutput)>, I18nError> {
        self.get(id)?.resolve_all(requests, &self.settings.content_property)
    }

    /// Parse an i18n property and resolve it in scope `id`.
    ///
    /// # Errors
    /// Invalid property shape, unknown scope, or markup errors.
    pub fn resolve_prop(
        &self,
        id: ScopeId,
        prop: I18nProp,
    ) -> Result<Vec<(String, ResolvedOutput)>, I18nError> {
        let requests = prop.into_requests(&self.settings.content_property)?;
        self.resolve_all(id, &requests)
    }

    fn push(&mut self, node: ScopeNode) -> ScopeId {
        self.nodes.push(Some(node));
        ScopeId(self.nodes.len() - 1)
    }
}
