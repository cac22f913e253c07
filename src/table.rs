use std::borrow::Cow;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LeadError, Result};
use crate::models::{LeadField, RankedLead, RawLead, DERIVED_COLUMNS};

/// One raw input column, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Field(LeadField),
    /// A column the pipeline carries through untouched; `index` points into
    /// `RawLead::passthrough`.
    Passthrough { name: String, index: usize },
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Field(field) => field.column_name(),
            Column::Passthrough { name, .. } => name,
        }
    }

    fn value<'a>(&self, lead: &'a RawLead) -> &'a str {
        match self {
            Column::Field(field) => lead.field(*field),
            Column::Passthrough { index, .. } => lead
                .passthrough
                .get(*index)
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// Where each cell of an input record goes.
enum Slot {
    Field(LeadField),
    Passthrough,
    Discard,
}

/// Short rows are padded with empty cells and extra cells are ignored, so a
/// ragged record degrades field by field instead of failing the load.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.flexible(true);
    builder
}

/// Raw lead records as loaded from CSV. Never modified by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadTable {
    pub columns: Vec<Column>,
    pub leads: Vec<RawLead>,
}

impl LeadTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = reader_builder().from_path(path)?;
        let table = Self::from_csv(reader)?;
        info!(path = %path.display(), rows = table.len(), "loaded lead table");
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_csv(reader_builder().from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
        let mut slots: Vec<Slot> = Vec::with_capacity(headers.len());
        let mut passthrough_count = 0usize;

        for header in headers.iter() {
            let field = LeadField::from_column_name(header)
                .filter(|field| !columns.contains(&Column::Field(*field)));

            if let Some(field) = field {
                columns.push(Column::Field(field));
                slots.push(Slot::Field(field));
            } else if DERIVED_COLUMNS.iter().any(|derived| *derived == header) {
                debug!(column = header, "discarding previously derived column");
                slots.push(Slot::Discard);
            } else {
                columns.push(Column::Passthrough {
                    name: header.to_string(),
                    index: passthrough_count,
                });
                slots.push(Slot::Passthrough);
                passthrough_count += 1;
            }
        }

        for field in LeadField::ALL {
            if !columns.contains(&Column::Field(field)) {
                return Err(LeadError::MissingColumn {
                    column: field.column_name(),
                });
            }
        }

        let mut leads = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut lead = RawLead {
                passthrough: Vec::with_capacity(passthrough_count),
                ..RawLead::default()
            };
            for (position, slot) in slots.iter().enumerate() {
                let value = record.get(position).unwrap_or("");
                match slot {
                    Slot::Field(field) => lead.set_field(*field, value.to_string()),
                    Slot::Passthrough => lead.passthrough.push(value.to_string()),
                    Slot::Discard => {}
                }
            }
            leads.push(lead);
        }

        Ok(Self { columns, leads })
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

/// Pipeline output: every raw column plus the derived ones, in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTable {
    pub columns: Vec<Column>,
    pub leads: Vec<RankedLead>,
}

impl RankedTable {
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// A view over every row.
    pub fn view(&self) -> RankedView<'_> {
        RankedView {
            columns: &self.columns,
            leads: self.leads.iter().collect(),
        }
    }

    pub fn headers(&self) -> Vec<&str> {
        output_headers(&self.columns)
    }
}

/// A read-only selection of rows from a [`RankedTable`], in rank order.
#[derive(Debug, Clone)]
pub struct RankedView<'a> {
    pub columns: &'a [Column],
    pub leads: Vec<&'a RankedLead>,
}

impl<'a> RankedView<'a> {
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn headers(&self) -> Vec<&str> {
        output_headers(self.columns)
    }

    /// Cell values of one row, aligned with [`RankedView::headers`].
    pub fn row_values(&self, lead: &'a RankedLead) -> Vec<Cow<'a, str>> {
        row_values(self.columns, lead)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.headers())?;
        for lead in self.leads.iter().copied() {
            let values = self.row_values(lead);
            writer.write_record(values.iter().map(|value| value.as_bytes()))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))?;
        info!(path = %path.display(), rows = self.len(), "exported leads");
        Ok(())
    }
}

fn output_headers(columns: &[Column]) -> Vec<&str> {
    columns
        .iter()
        .map(Column::name)
        .chain(DERIVED_COLUMNS.iter().copied())
        .collect()
}

fn row_values<'a>(columns: &[Column], lead: &'a RankedLead) -> Vec<Cow<'a, str>> {
    let enriched = &lead.lead;
    let mut values: Vec<Cow<'a, str>> = columns
        .iter()
        .map(|column| Cow::Borrowed(column.value(&enriched.raw)))
        .collect();
    values.push(Cow::Borrowed(enriched.email.as_str()));
    values.push(Cow::Borrowed(enriched.is_remote.as_str()));
    values.push(Cow::Borrowed(enriched.in_biotech_hub.as_str()));
    values.push(Cow::Owned(lead.probability_score.to_string()));
    values.push(Cow::Owned(lead.rank.to_string()));
    values
}
