//! Fragments rendered into the page, as HTML or as plain text
use crate::{api::SubmitResponse, error::Result, location::SavedLocation};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

const RESULT_TEMPLATE: &str = "result";
const MESSAGE_TEMPLATE: &str = "message";
const SAVED_LOCATIONS_TEMPLATE: &str = "saved_locations";

/// Output format of the rendered fragments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// HTML with every value escaped, for a browser page
    #[default]
    Html,
    /// Unescaped text, for terminals
    Text,
}

impl Markup {
    fn template_name(self, stem: &str) -> String {
        match self {
            Markup::Html => format!("{stem}.html"),
            Markup::Text => format!("{stem}.txt"),
        }
    }
}

/// Renders everything that the components put on the page.
///
/// Templates are picked by [Markup]. The `.html` ones are auto-escaped by minijinja.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
    markup: Markup,
}

impl Templates {
    pub fn new(markup: Markup) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("result.html", include_str!("templates/result.html"))?;
        env.add_template("message.html", include_str!("templates/message.html"))?;
        env.add_template(
            "saved_locations.html",
            include_str!("templates/saved_locations.html"),
        )?;
        env.add_template("result.txt", include_str!("templates/result.txt"))?;
        env.add_template("message.txt", include_str!("templates/message.txt"))?;
        env.add_template(
            "saved_locations.txt",
            include_str!("templates/saved_locations.txt"),
        )?;
        Ok(Self { env, markup })
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    fn render<S: Serialize>(&self, stem: &str, ctx: S) -> Result<String> {
        let name = self.markup.template_name(stem);
        Ok(self.env.get_template(&name)?.render(ctx)?)
    }

    /// The server's message followed by the list of upcoming overpasses, or a notice that there
    /// are none
    pub fn submit_result(&self, response: &SubmitResponse) -> Result<String> {
        let overpasses = response.overpasses.as_deref().unwrap_or_default();
        self.render(
            RESULT_TEMPLATE,
            context!(
                message => &response.message,
                overpasses => overpasses,
            ),
        )
    }

    /// A plain text message
    pub fn message(&self, message: &str) -> Result<String> {
        self.render(MESSAGE_TEMPLATE, context!(message => message))
    }

    /// One entry per location, in the order given
    pub fn saved_locations(&self, locations: &[SavedLocation]) -> Result<String> {
        let entries: Vec<String> = locations.iter().map(ToString::to_string).collect();
        self.render(SAVED_LOCATIONS_TEMPLATE, context!(entries => entries))
    }
}
