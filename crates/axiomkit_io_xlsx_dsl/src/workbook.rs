//! Workbook definition: ordered sheets and the single resolve pass.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::adapter::WorkbookOutputAdapter;
use crate::conf::C_SHEET_NAME_REPLACE_TO;
use crate::configure::{ConfigureOutcome, run_configure};
use crate::error::XlsxDslResult;
use crate::page::PageDefinition;
use crate::sheet::SheetDefinition;
use crate::spec::{SpecCellStyle, SpecPageDefinition};
use crate::util::sanitize_sheet_name;

/// Root of the definition tree.
///
/// Sheets keep insertion order, which is also the output order. Names are
/// sanitized to valid Excel sheet names and act as lookup keys: asking for a
/// sheet twice returns the same definition. Named styles live here and are
/// looked up when the sheets resolve.
pub struct WorkbookDefinition<W: WorkbookOutputAdapter> {
    adapter: W,
    sheets: IndexMap<String, SheetDefinition<W::Sheet>>,
    styles: IndexMap<String, SpecCellStyle>,
    page_default: Option<SpecPageDefinition>,
    sheet_name_replace_to: String,
}

impl<W: WorkbookOutputAdapter> WorkbookDefinition<W> {
    pub fn new(adapter: W) -> Self {
        Self {
            adapter,
            sheets: IndexMap::new(),
            styles: IndexMap::new(),
            page_default: None,
            sheet_name_replace_to: C_SHEET_NAME_REPLACE_TO.to_string(),
        }
    }

    /// Override the replacement used for illegal sheet-name characters.
    pub fn with_sheet_name_replace_to(mut self, replace_to: impl Into<String>) -> Self {
        self.sheet_name_replace_to = replace_to.into();
        self
    }

    /// Build a workbook in one call: configure, resolve, return the adapter.
    pub fn build<F, R>(adapter: W, configure: F) -> XlsxDslResult<W>
    where
        F: FnOnce(&mut Self) -> R,
        R: ConfigureOutcome,
    {
        let mut workbook = Self::new(adapter);
        run_configure(&mut workbook, configure)?;
        workbook.resolve()
    }

    /// Look up or create the sheet `name` and configure it.
    pub fn sheet<F, R>(&mut self, name: &str, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut SheetDefinition<W::Sheet>) -> R,
        R: ConfigureOutcome,
    {
        run_configure(self.sheet_mut(name)?, configure)?;
        Ok(self)
    }

    /// Look up or create the sheet `name`.
    pub fn sheet_mut(&mut self, name: &str) -> XlsxDslResult<&mut SheetDefinition<W::Sheet>> {
        let c_name = sanitize_sheet_name(name, &self.sheet_name_replace_to);
        if c_name != name {
            tracing::warn!(requested = name, sanitized = %c_name, "sheet name sanitized");
        }

        match self.sheets.entry(c_name) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let c_name = entry.key().clone();
                tracing::debug!(sheet = %c_name, "create sheet");
                let adapter = self.adapter.create_sheet(&c_name)?;
                let sheet = entry.insert(SheetDefinition::new(c_name, adapter));
                if let Some(page) = &self.page_default {
                    sheet.apply_page_spec(page)?;
                }
                Ok(sheet)
            }
        }
    }

    /// Look up or create the named style `name` and configure it.
    ///
    /// Rows and cells refer to it by name; names are resolved when the
    /// workbook resolves, so a style may be defined after its first use.
    pub fn style<F, R>(&mut self, name: &str, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut SpecCellStyle) -> R,
        R: ConfigureOutcome,
    {
        let style = self.styles.entry(name.to_string()).or_default();
        run_configure(style, configure)?;
        Ok(self)
    }

    /// Named style by name.
    pub fn get_style(&self, name: &str) -> Option<&SpecCellStyle> {
        self.styles.get(name)
    }

    /// Configure the default print layout of sheets created afterwards.
    pub fn page<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut PageDefinition) -> R,
        R: ConfigureOutcome,
    {
        let mut page = PageDefinition::new();
        run_configure(&mut page, configure)?;
        let page_base = self.page_default.unwrap_or_default();
        self.page_default = Some(page_base.merge(page.spec()));
        Ok(self)
    }

    /// Sheet by its (sanitized) name.
    pub fn get_sheet(&self, name: &str) -> Option<&SheetDefinition<W::Sheet>> {
        self.sheets.get(name)
    }

    /// Sheet names in output order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Resolve every sheet in order and hand its adapter back to the output.
    pub fn resolve(mut self) -> XlsxDslResult<W> {
        tracing::debug!(sheets = self.sheets.len(), "resolve workbook");
        for (_, mut sheet) in self.sheets.drain(..) {
            sheet.resolve(&self.styles)?;
            self.adapter.finish_sheet(sheet.into_adapter())?;
        }
        Ok(self.adapter)
    }
}

impl<W: WorkbookOutputAdapter> std::fmt::Debug for WorkbookDefinition<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.sheets.values()).finish()
    }
}
