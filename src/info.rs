use crate::refs::{ObjectReferences, RefType};
use chrono::prelude::*;
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written to the PDF information dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Keywords for the document. Adobe Acrobat suggests a comma separated list
    pub keywords: Option<String>,
    /// When the document was produced. Defaults to the moment it is written.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    /// Pin the creation date, e.g. to make output reproducible
    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        let created = self
            .created
            .unwrap_or_else(|| Local::now().fixed_offset());
        info.creation_date(pdf_date(created));
    }
}

fn pdf_date(at: DateTime<FixedOffset>) -> PDate {
    let offset = at.offset().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
