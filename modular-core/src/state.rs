// Route descriptors ("states")

use crate::controller::InjectableController;
use crate::resolve::{Dependency, Resolver};

/// Template of the abstract state of a module: a bare nested-view outlet.
pub const NESTED_VIEW_TEMPLATE: &str = "<div ui-view></div>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Inline(String),
    Url(String),
}

/// Controller attached to a state
#[derive(Debug, Clone)]
pub enum ControllerRef {
    /// A controller registered by name on the application
    Named(String),
    Injectable(InjectableController),
}

impl ControllerRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            ControllerRef::Named(name) => Some(name),
            ControllerRef::Injectable(_) => None,
        }
    }
}

/// Caller-supplied description of a state; missing fields are filled in
/// when the state is declared.
#[derive(Debug, Clone, Default)]
pub struct StateConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub is_abstract: bool,
    pub template: Option<String>,
    pub template_url: Option<String>,
    pub controller: Option<ControllerRef>,
    pub resolve: Option<Vec<Dependency>>,
}

impl StateConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn abstract_state(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn controller_name(mut self, name: impl Into<String>) -> Self {
        self.controller = Some(ControllerRef::Named(name.into()));
        self
    }

    pub fn controller(mut self, controller: InjectableController) -> Self {
        self.controller = Some(ControllerRef::Injectable(controller));
        self
    }

    pub fn resolve(mut self, dependencies: Vec<Dependency>) -> Self {
        self.resolve = Some(dependencies);
        self
    }

    /// Template from the config; an inline template wins over a URL.
    pub(crate) fn take_template(&mut self) -> Option<Template> {
        match (self.template.take(), self.template_url.take()) {
            (Some(inline), _) => Some(Template::Inline(inline)),
            (None, Some(url)) => Some(Template::Url(url)),
            (None, None) => None,
        }
    }
}

/// A fully described, registrable state
#[derive(Debug, Clone)]
pub struct State {
    pub name: String,
    pub url: String,
    pub title: Option<String>,
    pub is_abstract: bool,
    pub template: Option<Template>,
    pub controller: Option<ControllerRef>,
    pub resolve: Option<Resolver>,
}

impl State {
    /// Build a state from `config` as declared on the application: the name
    /// is used verbatim and a non-empty resolve list becomes one resolver.
    pub fn declare(name: impl Into<String>, mut config: StateConfig) -> Self {
        let template = config.take_template();
        let resolve = config
            .resolve
            .filter(|deps| !deps.is_empty())
            .map(Resolver::new);

        Self {
            name: name.into(),
            url: config.url.unwrap_or_default(),
            title: config.title,
            is_abstract: config.is_abstract,
            template,
            controller: config.controller,
            resolve,
        }
    }

    /// Name of the enclosing state, if any
    pub fn parent_name(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(parent, _)| parent)
    }

    pub fn template_url(&self) -> Option<&str> {
        match &self.template {
            Some(Template::Url(url)) => Some(url),
            _ => None,
        }
    }
}
