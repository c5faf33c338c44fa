#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// ToUnicode map for [`PdfBuilder::add_cmap_font`]: two-byte glyph codes
/// `0001..001A` are `A..Z` and `0021..003A` are `a..z`.
const GLYPH_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo <<
/Registry (Adobe)
/Ordering (UCS)
/Supplement 0
>> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfrange
<0001> <001A> <0041>
<0021> <003A> <0061>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// One show-text operation per run, all in a single text object.
pub fn text_ops(runs: &[&str]) -> Vec<Operation> {
    text_ops_in("F1", runs)
}

pub fn text_ops_in(font: &str, runs: &[&str]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for run in runs {
        ops.push(Operation::new("Tj", vec![Object::string_literal(*run)]));
        ops.push(Operation::new("Td", vec![0.into(), (-14).into()]));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

/// `text` as glyph codes of the font from [`PdfBuilder::add_cmap_font`].
pub fn glyph_string(text: &str) -> Object {
    let bytes = text
        .bytes()
        .flat_map(|byte| match byte {
            b'A'..=b'Z' => [0, byte - b'A' + 0x01],
            b'a'..=b'z' => [0, byte - b'a' + 0x21],
            other => panic!("no glyph for {:?}", other as char),
        })
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

pub fn win_ansi_font() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Assembles a PDF whose pages share one resource dictionary on the page
/// tree root. `F1` is always a WinAnsi Helvetica.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    fonts: Dictionary,
    xobjects: Dictionary,
    kids: Vec<Object>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut builder = Self {
            doc,
            pages_id,
            fonts: Dictionary::new(),
            xobjects: Dictionary::new(),
            kids: Vec::new(),
        };
        builder.add_font("F1", win_ansi_font());
        builder
    }

    pub fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        self.doc.add_object(object)
    }

    pub fn add_font(&mut self, name: &str, font: Dictionary) -> &mut Self {
        let id = self.doc.add_object(font);
        self.fonts.set(name, id);
        self
    }

    /// A Type0 Identity-H font whose text only decodes through its
    /// ToUnicode map.
    pub fn add_cmap_font(&mut self, name: &str) -> &mut Self {
        let cmap_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, GLYPH_CMAP.as_bytes().to_vec()));
        let descendant_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "MenuSans",
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
        });
        self.add_font(
            name,
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => "MenuSans",
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![descendant_id.into()],
                "ToUnicode" => cmap_id,
            },
        )
    }

    /// Registers form XObject `name` drawing `operations`, with its own
    /// resource dictionary when `resources` is given.
    pub fn add_form(&mut self, name: &str, operations: Vec<Operation>, resources: Option<Dictionary>) -> &mut Self {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        if let Some(resources) = resources {
            dict.set("Resources", resources);
        }
        let content = Content { operations };
        let id = self.doc.add_object(Stream::new(
            dict,
            content.encode().expect("form content should encode"),
        ));
        self.xobjects.set(name, id);
        self
    }

    pub fn add_page(&mut self, operations: Vec<Operation>) -> &mut Self {
        let content = Content { operations };
        let content_id = self.doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content should encode"),
        ));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.kids.push(Object::from(page_id));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let Self {
            mut doc,
            pages_id,
            fonts,
            xobjects,
            kids,
        } = self;
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }
}

/// Builds a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut builder = PdfBuilder::new();
    for operations in pages {
        builder.add_page(operations);
    }
    builder.build()
}

/// A week laid out roughly like the New Residence menu: the day headings on
/// the first page, the rest spilling onto a second page.
pub fn nrh_menu_pdf() -> Vec<u8> {
    build_pdf(vec![
        text_ops(&[
            "MONDAY",
            "BREAKFAST",
            "Scrambled Eggs",
            "DINNER",
            "Roast Chicken",
            "Rice Pilaf",
            "SPECIALS",
            "Sushi Bar",
            "TUESDAY",
            "DINNER",
            "Beef Tacos",
            "Black Beans",
            "L E G E N D",
            "(V) Vegan",
        ]),
        text_ops(&[
            "WEDNESDAY",
            "DINNER",
            "Butter Chicken",
            "Naan",
            "for",
            "GRILL ITEMS SANDWICHES",
            "THURSDAY",
            "DINNER",
            "Lasagna",
            "Caesar Salad",
            "SPECIALS",
            "FRIDAY",
            "DINNER",
            "Fish and Chips",
            "Coleslaw",
            "SATURDAY",
            "CLOSED",
        ]),
    ])
}
