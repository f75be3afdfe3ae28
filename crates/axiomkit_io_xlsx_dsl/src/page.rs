//! Page (print layout) definition.

use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::{EnumFit, EnumOrientation, EnumPaper};
use crate::spec::SpecPageDefinition;

/// Print layout builder handed to `page(...)` callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageDefinition {
    spec: SpecPageDefinition,
}

impl PageDefinition {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set page orientation.
    pub fn orientation(&mut self, orientation: EnumOrientation) -> &mut Self {
        self.spec.orientation = Some(orientation);
        self
    }

    /// Set paper size.
    pub fn paper(&mut self, paper: EnumPaper) -> &mut Self {
        self.spec.paper = Some(paper);
        self
    }

    /// Fit the printed width or height to `pages` pages.
    pub fn fit(&mut self, fit: EnumFit, pages: u16) -> XlsxDslResult<&mut Self> {
        if pages == 0 {
            return Err(EnumXlsxDslError::invalid("fit pages must be >= 1"));
        }
        *self.spec.fit_slot(fit) = Some(pages);
        Ok(self)
    }

    /// Configured layout.
    pub fn spec(&self) -> &SpecPageDefinition {
        &self.spec
    }
}
