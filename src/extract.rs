//! Flattens a PDF into the run-together text the parser works on.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::try_join_all;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};
use tracing::{debug, info, warn};

use crate::error::{MenuError, Result};

/// A paged document that can hand out the text runs of each page.
///
/// Page numbers are 1-based, matching how the document numbers them.
pub trait PageSource {
    type Page;

    fn page_count(&self) -> u32;

    fn load_page(&self, number: u32) -> impl Future<Output = Result<Self::Page>>;

    /// Text runs of `page` in the order they are drawn.
    fn text_runs(&self, page: &Self::Page) -> impl Future<Output = Result<Vec<String>>>;
}

/// Concatenates every run of every page, page 1 first, with nothing in
/// between.
///
/// Pages are loaded and read concurrently. Results come back in page order
/// however the individual futures finish, and one failing page fails the
/// whole document.
pub async fn extract_text<S: PageSource>(source: &S) -> Result<String> {
    let count = source.page_count();
    let pages = try_join_all((1..=count).map(|number| source.load_page(number))).await?;
    let runs = try_join_all(pages.iter().map(|page| source.text_runs(page))).await?;
    let text: String = runs.into_iter().map(|page_runs| page_runs.concat()).collect();
    info!(pages = count, chars = text.len(), "extracted document text");
    Ok(text)
}

pub async fn extract_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let source = LopdfSource::from_bytes(bytes)?;
    extract_text(&source).await
}

/// [`PageSource`] backed by an in-memory `lopdf` document.
#[derive(Debug)]
pub struct LopdfSource {
    doc: Document,
    pages: BTreeMap<u32, ObjectId>,
}

#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    pub number: u32,
    id: ObjectId,
}

impl LopdfSource {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();
        debug!(pages = pages.len(), version = %doc.version, "loaded PDF");
        Ok(Self { doc, pages })
    }

    fn page_runs(&self, page: LopdfPage) -> Result<Vec<String>> {
        let resources = self.page_resources(page.id)?;
        let mut reader = RunReader::new(&self.doc);
        reader.read(&self.doc.get_page_content(page.id)?, &resources, None)?;
        debug!(page = page.number, runs = reader.runs.len(), "read page text runs");
        Ok(reader.runs)
    }

    /// Resource dictionaries in lookup order: the page's own first, then
    /// those inherited from each ancestor in the page tree.
    fn page_resources(&self, page_id: ObjectId) -> Result<Vec<&Dictionary>> {
        let mut resources = Vec::new();
        let mut seen = BTreeSet::new();
        let mut node = Some((page_id, self.doc.get_dictionary(page_id)?));
        while let Some((id, dict)) = node {
            if !seen.insert(id) {
                break;
            }
            if let Some(own) = dict.get(b"Resources").ok().and_then(|obj| deref_dict(&self.doc, obj)) {
                resources.push(own);
            }
            node = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|parent| Ok((parent, self.doc.get_dictionary(parent)?)))
                .ok();
        }
        Ok(resources)
    }
}

fn deref_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    doc.dereference(object).ok()?.1.as_dict().ok()
}

/// First `/<category> /<name>` entry across `resources`.
fn lookup_resource<'a>(
    doc: &'a Document,
    resources: &[&'a Dictionary],
    category: &[u8],
    name: &[u8],
) -> Option<&'a Object> {
    resources.iter().find_map(|dict| {
        let entries = deref_dict(doc, dict.get(category).ok()?)?;
        entries.get(name).ok()
    })
}

/// Walks content streams, following `Do` into form XObjects, and collects
/// one run per text-showing operator.
struct RunReader<'a> {
    doc: &'a Document,
    /// Fonts selected so far with their encoding, resolved on first `Tf`.
    /// `None` means lopdf can't decode this font and its bytes are read as
    /// lossy UTF-8.
    fonts: Vec<(&'a Dictionary, Option<Encoding<'a>>)>,
    /// Forms currently being drawn.
    open_forms: BTreeSet<ObjectId>,
    runs: Vec<String>,
}

impl<'a> RunReader<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            fonts: Vec::new(),
            open_forms: BTreeSet::new(),
            runs: Vec::new(),
        }
    }

    /// `font` is the font in effect when the stream starts, as an index into
    /// `self.fonts`.
    fn read(&mut self, content: &[u8], resources: &[&'a Dictionary], mut font: Option<usize>) -> Result<()> {
        let content = Content::decode(content)?;
        let doc = self.doc;
        let mut saved = Vec::new();
        for operation in &content.operations {
            let operands = &operation.operands;
            match operation.operator.as_str() {
                "q" => saved.push(font),
                "Q" => {
                    if let Some(restored) = saved.pop() {
                        font = restored;
                    }
                }
                "Tf" => {
                    font = operands
                        .first()
                        .and_then(|name| name.as_name().ok())
                        .and_then(|name| lookup_resource(doc, resources, b"Font", name))
                        .and_then(|font| deref_dict(doc, font))
                        .map(|dict| self.font_index(dict));
                }
                // ' and " carry spacing operands before the string
                "Tj" | "TJ" | "'" | "\"" => {
                    let encoding = font.and_then(|index| self.fonts[index].1.as_ref());
                    let mut run = String::new();
                    if let Some(operand) = operands.last() {
                        collect_run(&mut run, encoding, operand);
                    }
                    self.runs.push(run);
                }
                "Do" => {
                    if let Some(name) = operands.first().and_then(|name| name.as_name().ok()) {
                        self.draw_form(name, resources, font)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn font_index(&mut self, font: &'a Dictionary) -> usize {
        if let Some(index) = self.fonts.iter().position(|(known, _)| std::ptr::eq(*known, font)) {
            return index;
        }
        let encoding = match font.get_font_encoding(self.doc) {
            Ok(encoding) => Some(encoding),
            Err(err) => {
                warn!(%err, "unsupported font encoding, reading its text as UTF-8");
                None
            }
        };
        self.fonts.push((font, encoding));
        self.fonts.len() - 1
    }

    /// Reads the text of form XObject `name`. Images and unknown names draw
    /// no text.
    fn draw_form(&mut self, name: &[u8], resources: &[&'a Dictionary], font: Option<usize>) -> Result<()> {
        let doc = self.doc;
        let Some(object) = lookup_resource(doc, resources, b"XObject", name) else {
            debug!(name = %String::from_utf8_lossy(name), "no such XObject");
            return Ok(());
        };
        let (id, object) = doc.dereference(object)?;
        let Ok(stream) = object.as_stream() else {
            return Ok(());
        };
        if stream.dict.get(b"Subtype").and_then(Object::as_name).ok() != Some(b"Form".as_slice()) {
            return Ok(());
        }
        if let Some(id) = id
            && !self.open_forms.insert(id)
        {
            warn!(?id, "form XObject draws itself, skipping");
            return Ok(());
        }

        // a form without its own resources uses those of whatever draws it
        let mut form_resources = Vec::with_capacity(resources.len() + 1);
        if let Some(own) = stream.dict.get(b"Resources").ok().and_then(|obj| deref_dict(doc, obj)) {
            form_resources.push(own);
        }
        form_resources.extend_from_slice(resources);

        let result = stream
            .get_plain_content()
            .map_err(MenuError::from)
            .and_then(|content| self.read(&content, &form_resources, font));
        if let Some(id) = id {
            self.open_forms.remove(&id);
        }
        result
    }
}

fn collect_run(run: &mut String, encoding: Option<&Encoding>, operand: &Object) {
    match operand {
        Object::String(bytes, _) => match encoding.map(|encoding| Document::decode_text(encoding, bytes)) {
            Some(Ok(text)) => run.push_str(&text),
            Some(Err(err)) => {
                warn!(%err, "failed to decode text run, reading it as UTF-8");
                run.push_str(&String::from_utf8_lossy(bytes));
            }
            None => run.push_str(&String::from_utf8_lossy(bytes)),
        },
        // TJ arrays interleave strings with kerning numbers
        Object::Array(items) => {
            for item in items {
                collect_run(run, encoding, item);
            }
        }
        _ => {}
    }
}

impl PageSource for LopdfSource {
    type Page = LopdfPage;

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn load_page(&self, number: u32) -> Result<LopdfPage> {
        let id = *self
            .pages
            .get(&number)
            .ok_or(MenuError::PageNotFound(number))?;
        Ok(LopdfPage { number, id })
    }

    async fn text_runs(&self, page: &LopdfPage) -> Result<Vec<String>> {
        self.page_runs(*page)
    }
}
