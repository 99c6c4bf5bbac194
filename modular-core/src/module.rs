//! Modules: named groups of views and states under a common URL prefix.
//!
//! Creating a module declares an abstract state `/<name>` whose template is a
//! nested-view outlet and adds a sidebar entry that the module's views fill
//! with children.
//!
//! ## Naming conventions
//!
//! [`Module::add_state`] fills in whatever the caller left out, from the last
//! dot segment of the state name split on `_`:
//!
//! | name                   | url             | title          | template                                   | controller                     |
//! |------------------------|-----------------|----------------|--------------------------------------------|--------------------------------|
//! | `reports.summary_view` | `/summary-view` | `Summary View` | `<modules_dir>/<folder>/views/summary-view.html` | `ReportsSummaryViewController` |
//!
//! ```
//! use modular_core::{Application, CoreSettings, ModuleSettings, StateConfig};
//!
//! let mut app = Application::new(CoreSettings::default());
//! let reports = app
//!     .add_module("reports", "Reports", 2, ModuleSettings::default())
//!     .unwrap();
//! reports.add_state(StateConfig::new("reports.summary_view"));
//!
//! let state = &reports.states()[0];
//! assert_eq!(state.name, "app.reports.summary_view");
//! assert_eq!(state.url, "/summary-view");
//! ```

use crate::host::HostModule;
use crate::logging::{debug, error};
use crate::menu::{Menu, MenuItem, SharedMenuItem};
use crate::resolve::{Dependency, Resolver};
use crate::scope::RootScope;
use crate::settings::{CoreSettings, ModuleSettings};
use crate::state::{ControllerRef, NESTED_VIEW_TEMPLATE, State, StateConfig, Template};
use crate::view::{ModuleContext, View, ViewParams};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct Module {
    host: HostModule,
    settings: Arc<CoreSettings>,
    name: String,
    title: String,
    folder: String,
    position: i32,
    menu: SharedMenuItem,
    states: Vec<State>,
    views: HashMap<String, View>,
    started: bool,
}

impl Module {
    pub(crate) fn new(
        host: HostModule,
        settings: Arc<CoreSettings>,
        menu: &mut Menu,
        name: &str,
        title: &str,
        position: i32,
        module_settings: ModuleSettings,
    ) -> Self {
        host.add_state(
            settings.qualify(name),
            StateConfig::default()
                .url(format!("/{}", name))
                .abstract_state()
                .template(NESTED_VIEW_TEMPLATE),
        );

        let entry = menu.add(
            MenuItem::new(title, "#")
                .with_position(position)
                .with_icon(settings.module_icon.clone()),
        );

        Self {
            host,
            settings,
            name: name.to_string(),
            title: title.to_string(),
            folder: module_settings.folder.unwrap_or_else(|| name.to_string()),
            position,
            menu: entry,
            states: Vec::new(),
            views: HashMap::new(),
            started: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Copy of this module's sidebar entry
    pub fn menu_entry(&self) -> MenuItem {
        self.menu.read().clone()
    }

    /// States accumulated by `add_state`, registered on `start`
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn get_view(&self, name: &str) -> Option<&View> {
        self.views.get(name)
    }

    pub fn get_view_mut(&mut self, name: &str) -> Option<&mut View> {
        self.views.get_mut(name)
    }

    pub fn view_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Create a view. Call [`View::compile`] on the result to declare its
    /// route.
    pub fn add_view(&mut self, params: ViewParams) -> Result<&mut View> {
        if self.views.contains_key(&params.name) {
            return Err(Error::DuplicateView {
                module: self.name.clone(),
                view: params.name,
            });
        }

        let name = params.name.clone();
        let view = View::new(self.context(), params);
        debug!(module = %self.name, view = %name, "View added");
        Ok(self.views.entry(name).or_insert(view))
    }

    pub fn add_menu_item(&mut self, item: MenuItem) -> &mut Self {
        self.menu.write().childs.push(item);
        self
    }

    pub fn add_menu_items<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = MenuItem>,
    {
        self.menu.write().childs.extend(items);
        self
    }

    pub fn add_states<I>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = StateConfig>,
    {
        for state in states {
            self.add_state(state);
        }
        self
    }

    /// Complete `config` by convention and keep it for [`start`](Self::start).
    ///
    /// A state without a name is logged and skipped.
    pub fn add_state(&mut self, mut config: StateConfig) -> &mut Self {
        let Some(name) = config.name.take() else {
            error!(module = %self.name, "Cannot add a state without a name");
            return self;
        };

        let words = last_segment_words(&name);
        let hyphenated = words.join("-");

        let url = config
            .url
            .take()
            .unwrap_or_else(|| format!("/{}", hyphenated));
        let title = config.title.take().unwrap_or_else(|| {
            words
                .iter()
                .map(|word| capitalize(word))
                .collect::<Vec<_>>()
                .join(" ")
        });

        let views_dir = format!("{}/{}/views", self.settings.modules_dir, self.folder);
        let template = match (config.template.take(), config.template_url.take()) {
            (Some(inline), _) => Template::Inline(inline),
            (None, Some(url)) => Template::Url(format!("{}/{}", views_dir, url)),
            (None, None) => Template::Url(format!("{}/{}.html", views_dir, hyphenated)),
        };

        let controller = config
            .controller
            .take()
            .unwrap_or_else(|| ControllerRef::Named(controller_name(&name)));

        let mut steps = config.resolve.take().unwrap_or_default();
        steps.extend(
            self.settings
                .common_dependencies
                .iter()
                .cloned()
                .map(Dependency::Named),
        );

        let state = State {
            name: self.settings.qualify(&name),
            url,
            title: Some(title),
            is_abstract: config.is_abstract,
            template: Some(template),
            controller: Some(controller),
            resolve: Some(Resolver::new(steps)),
        };
        debug!(module = %self.name, state = %state.name, "State added");
        self.states.push(state);
        self
    }

    /// Publish the menu entry to the root scope and declare every state
    /// added so far. May be called only once.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(Error::AlreadyStarted(self.name.clone()));
        }
        self.started = true;

        let menu = self.menu.clone();
        self.host
            .run(move |scope: &RootScope| scope.push_menu_item(menu));

        let states = self.states.clone();
        self.host.config(move |registry| {
            for state in states {
                registry.register(state)?;
            }
            Ok(())
        });

        debug!(module = %self.name, states = self.states.len(), "Module started");
        Ok(())
    }

    fn context(&self) -> ModuleContext {
        ModuleContext {
            host: self.host.clone(),
            settings: self.settings.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            menu: self.menu.clone(),
        }
    }
}

fn last_segment_words(name: &str) -> Vec<&str> {
    name.rsplit('.').next().unwrap_or(name).split('_').collect()
}

/// First character upper-cased, the rest untouched
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `reports.summary_view` becomes `ReportsSummaryViewController`
fn controller_name(state_name: &str) -> String {
    let mut name: String = state_name
        .split('.')
        .flat_map(|segment| segment.split('_'))
        .map(capitalize)
        .collect();
    name.push_str("Controller");
    name
}
