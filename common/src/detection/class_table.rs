use std::collections::HashMap;

/// Label to class identifier table.
///
/// Identifiers are handed out in first-seen order, starting after any seeded
/// labels, and the table grows with every new label. Two distinct labels
/// therefore never share an identifier, however many classes a model reports.
/// The only bounded space is the colour palette, see [`palette_index`].
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table so configured classes keep stable identifiers across requests.
    pub fn with_labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut table = Self::new();
        for label in labels {
            table.identify(label.as_ref());
        }
        table
    }

    pub fn identify(&mut self, label: &str) -> usize {
        if let Some(class_id) = self.index.get(label) {
            return *class_id;
        }
        let class_id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), class_id);
        class_id
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, class_id: usize) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Colour slot for a class identifier.
///
/// Wraps once identifiers outnumber the palette: distinct classes may then be
/// drawn in the same colour, but they keep distinct identifiers and labels.
pub fn palette_index(class_id: usize, palette_len: usize) -> usize {
    if palette_len == 0 {
        0
    } else {
        class_id % palette_len
    }
}
