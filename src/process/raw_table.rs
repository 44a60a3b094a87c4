use std::fmt;

/// A decoded CSV file before any column mapping.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names, exactly as the header row spells them.
    pub headers: Vec<String>,
    /// One entry per data row. `None` is a missing cell (empty or an NA marker).
    pub rows: Vec<Vec<Option<String>>>,
}

/// The six fact-check columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Headline,
    Source,
    StatedOn,
    Date,
    Label,
    Link,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Headline,
        Column::Source,
        Column::StatedOn,
        Column::Date,
        Column::Label,
        Column::Link,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Headline => "News_Headline",
            Column::Source => "Source",
            Column::StatedOn => "Stated_On",
            Column::Date => "Date",
            Column::Label => "Label",
            Column::Link => "Link_Of_News",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One fact-check row. Every field is an untyped string until the transform
/// stages rewrite it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    pub headline: Option<String>,
    pub source: Option<String>,
    pub stated_on: Option<String>,
    pub date: Option<String>,
    pub label: Option<String>,
    pub link: Option<String>,
}

impl Record {
    pub fn get(&self, col: Column) -> Option<&str> {
        self.field(col).as_deref()
    }

    pub fn field(&self, col: Column) -> &Option<String> {
        match col {
            Column::Headline => &self.headline,
            Column::Source => &self.source,
            Column::StatedOn => &self.stated_on,
            Column::Date => &self.date,
            Column::Label => &self.label,
            Column::Link => &self.link,
        }
    }

    pub fn field_mut(&mut self, col: Column) -> &mut Option<String> {
        match col {
            Column::Headline => &mut self.headline,
            Column::Source => &mut self.source,
            Column::StatedOn => &mut self.stated_on,
            Column::Date => &mut self.date,
            Column::Label => &mut self.label,
            Column::Link => &mut self.link,
        }
    }

    pub fn set(&mut self, col: Column, value: Option<String>) {
        *self.field_mut(col) = value;
    }
}

/// Ordered rows. Stages may remove rows but never reorder them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, col: Column) -> impl Iterator<Item = Option<&str>> + '_ {
        self.records.iter().map(move |r| r.get(col))
    }

    /// Apply `f` to every cell of `col`.
    pub fn map_column<F>(&mut self, col: Column, mut f: F)
    where
        F: FnMut(Option<&str>) -> Option<String>,
    {
        for rec in &mut self.records {
            let next = f(rec.get(col));
            rec.set(col, next);
        }
    }

    /// Rows projected onto the output column order.
    pub fn ordered_rows(&self) -> impl Iterator<Item = [Option<&str>; 6]> + '_ {
        self.records
            .iter()
            .map(|r| Column::ALL.map(|col| r.get(col)))
    }
}
