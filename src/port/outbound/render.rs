//! Render port: the chart library sits behind this trait.

use crate::domain::Page;
use crate::error::Result;

pub trait PageRenderer {
    fn render(&self, page: &Page) -> Result<()>;
}
