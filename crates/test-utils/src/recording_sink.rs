use sfnview::live::RowSink;
use sfnview::table::{Row, Schema};

/// A sink that keeps everything it is given, for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub schemas: Vec<Schema>,
    pub rows: Vec<Row>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowSink for RecordingSink {
    fn schema_established(&mut self, schema: &Schema) {
        self.schemas.push(schema.clone());
    }

    fn log(&mut self, row: &Row) {
        self.rows.push(row.clone());
    }
}
