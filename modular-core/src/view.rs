// Views: one titled, templated route of a module

use crate::controller::{Callback, Controller};
use crate::host::HostModule;
use crate::logging::debug;
use crate::menu::{MenuItem, SharedMenuItem};
use crate::resolve::Dependency;
use crate::scope::{ROOT_SCOPE, RootScope};
use crate::settings::CoreSettings;
use crate::state::StateConfig;
use std::sync::Arc;

/// Parameters of [`Module::add_view`](crate::Module::add_view)
#[derive(Debug, Clone, Default)]
pub struct ViewParams {
    pub name: String,
    /// Defaults to the name
    pub title: Option<String>,
    pub controller: Option<Callback>,
    /// Defaults to `<name>.html`
    pub template: Option<String>,
    /// Bundles resolved before the view is shown
    pub vendors: Vec<String>,
}

impl ViewParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn controller(mut self, controller: Callback) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendors.push(vendor.into());
        self
    }
}

/// Context a view needs from its module
#[derive(Debug, Clone)]
pub(crate) struct ModuleContext {
    pub host: HostModule,
    pub settings: Arc<CoreSettings>,
    pub name: String,
    pub title: String,
    pub menu: SharedMenuItem,
}

#[derive(Debug)]
pub struct View {
    module: ModuleContext,
    name: String,
    title: String,
    controller: Controller,
    template: String,
    vendors: Vec<String>,
}

impl View {
    pub(crate) fn new(module: ModuleContext, params: ViewParams) -> Self {
        let title = params.title.unwrap_or_else(|| params.name.clone());
        let template = params
            .template
            .unwrap_or_else(|| format!("{}.html", params.name));

        let mut controller = Controller::new();
        controller.add(title_callback(&title, &module.title));
        if let Some(callback) = params.controller {
            controller.add(callback);
        }

        Self {
            module,
            name: params.name,
            title,
            controller,
            template,
            vendors: params.vendors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn vendors(&self) -> &[String] {
        &self.vendors
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Add callbacks before calling [`compile`](Self::compile)
    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Unqualified state name, `<module>.<view>`
    pub fn state_name(&self) -> String {
        format!("{}.{}", self.module.name, self.name)
    }

    /// Declare the view's state and add it to the module's menu.
    ///
    /// Compiling twice declares the state twice, which the router rejects at
    /// bootstrap, and adds a second menu entry.
    pub fn compile(&self) {
        let settings = &self.module.settings;
        let config = StateConfig::default()
            .url(format!("/{}", self.name))
            .template_url(format!(
                "{}/{}/views/{}",
                settings.view_template_dir, self.module.name, self.template
            ))
            .controller(self.controller.injectable())
            .resolve(self.vendors.iter().cloned().map(Dependency::Named).collect());

        let state_name = settings.qualify(&self.state_name());
        debug!(state = %state_name, "Compiling view");
        self.module.host.add_state(state_name, config);

        self.module.menu.write().childs.push(
            MenuItem::new(
                self.title.clone(),
                format!("{}/{}", self.module.name, self.name),
            )
            .with_icon(settings.view_icon.clone()),
        );
    }
}

/// Sets the page title to `"<view> - <module> - "` when the view activates.
fn title_callback(view_title: &str, module_title: &str) -> Callback {
    let title = format!("{} - {} - ", view_title, module_title);
    Callback::new([ROOT_SCOPE], move |services| {
        if let Some(scope) = services.get::<RootScope>(ROOT_SCOPE) {
            scope.set_title(title.clone());
        }
    })
}
