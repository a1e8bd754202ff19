//! `Contents.json` descriptor templates.
//!
//! Descriptors have a fixed shape; the only moving parts are the author tag,
//! the color space and the channel strings, plus whether a dark appearance
//! is present. Those are stamped into MiniJinja templates from a
//! serializable view so the JSON layout stays readable in one place.

use minijinja::{Environment, Value};
use serde::Serialize;

use colorsheet_parser::ast::Color;

use crate::error::CatalogError;

const GROUP: &str = "group";
const COLOR: &str = "color";

const GROUP_TEMPLATE: &str = r#"{
  "info" : {
    "author" : {{ author }},
    "version" : 1
  }
}
"#;

const COLOR_TEMPLATE: &str = r#"{
  "colors" : [
    {
      "color" : {
        "color-space" : {{ color_space }},
        "components" : {
          "alpha" : "{{ light.alpha }}",
          "blue" : "{{ light.blue }}",
          "green" : "{{ light.green }}",
          "red" : "{{ light.red }}"
        }
      },
      "idiom" : "universal"
    }{% if dark %},
    {
      "appearances" : [
        {
          "appearance" : "luminosity",
          "value" : "dark"
        }
      ],
      "color" : {
        "color-space" : {{ color_space }},
        "components" : {
          "alpha" : "{{ dark.alpha }}",
          "blue" : "{{ dark.blue }}",
          "green" : "{{ dark.green }}",
          "red" : "{{ dark.red }}"
        }
      },
      "idiom" : "universal"
    }{% endif %}
  ],
  "info" : {
    "author" : {{ author }},
    "version" : 1
  }
}
"#;

/// Channel values formatted the way asset catalogs store them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Components {
    pub red: String,
    pub green: String,
    pub blue: String,
    pub alpha: String,
}

impl From<&Color> for Components {
    fn from(color: &Color) -> Self {
        Self {
            red: format!("0x{:02X}", color.red),
            green: format!("0x{:02X}", color.green),
            blue: format!("0x{:02X}", color.blue),
            alpha: format!("{:.2}", color.alpha),
        }
    }
}

/// Data for one color entry descriptor.
///
/// `author` and `color_space` are stored JSON-encoded, quotes included.
#[derive(Debug, Serialize)]
pub struct ColorEntry {
    author: String,
    color_space: String,
    light: Components,
    dark: Option<Components>,
}

impl ColorEntry {
    pub fn new(author: &str, color_space: &str, light: &Color, dark: Option<&Color>) -> Self {
        Self {
            author: json_string(author),
            color_space: json_string(color_space),
            light: light.into(),
            dark: dark.map(Components::from),
        }
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Compiled descriptor templates.
pub struct DescriptorTemplates {
    env: Environment<'static>,
}

impl DescriptorTemplates {
    pub fn new() -> Result<Self, CatalogError> {
        let mut env = Environment::new();
        env.add_template(GROUP, GROUP_TEMPLATE)?;
        env.add_template(COLOR, COLOR_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders the descriptor written into every group folder.
    pub fn group(&self, author: &str) -> Result<String, CatalogError> {
        let ctx = minijinja::context! { author => json_string(author) };
        Ok(self.env.get_template(GROUP)?.render(ctx)?)
    }

    /// Renders the descriptor of a `.colorset` folder.
    pub fn color(&self, entry: &ColorEntry) -> Result<String, CatalogError> {
        Ok(self
            .env
            .get_template(COLOR)?
            .render(Value::from_serialize(entry))?)
    }
}
