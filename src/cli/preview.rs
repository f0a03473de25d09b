//! Preview command handler.

use color_eyre::Result;

use crate::context::Context;
use crate::models::Category;

use super::App;

impl App {
    /// Print the artifact for one category without writing anything.
    pub fn run_preview(&self, ctx: &Context, category: &str, class_name: Option<&str>) -> Result<()> {
        let category: Category = category.parse()?;
        let mut engine = ctx.engine()?;
        if let Some(name) = class_name {
            engine.set_class_name(category, name)?;
        }

        let artifact = engine.preview(category)?;
        tracing::debug!(
            class = artifact.class_name(),
            members = artifact.members().len(),
            "Rendered preview"
        );
        print!("{}", artifact.text());
        Ok(())
    }
}
