use reqwest::multipart::{Form, Part};

/// One value in a multipart body: plain text or a file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}

/// Multipart builder for the backend's indexed array-field convention:
/// repeated structures are flattened to `Collection[i].field` keys, and
/// an empty collection still sends one placeholder row with empty
/// values. The backend's binder relies on that placeholder, so it is
/// preserved verbatim rather than redesigned.
///
/// Keeps its own ordered entry list so tests can assert on exact keys
/// before the form is handed to the transport.
#[derive(Debug, Default)]
pub struct IndexedForm {
    entries: Vec<(String, FormValue)>,
}

impl IndexedForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), FormValue::Text(value.into())));
        self
    }

    pub fn file(
        mut self,
        key: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.entries.push((
            key.into(),
            FormValue::File {
                file_name: file_name.into(),
                bytes,
            },
        ));
        self
    }

    /// Flatten `items` under `prefix` with `append(row, index, item)`
    /// filling each row. An empty collection emits one placeholder row
    /// with every field in `placeholder_fields` set to "".
    pub fn indexed<T>(
        mut self,
        prefix: &str,
        items: &[T],
        placeholder_fields: &[&str],
        mut append: impl FnMut(RowBuilder<'_>, usize, &T),
    ) -> Self {
        if items.is_empty() {
            for field in placeholder_fields {
                self.entries.push((
                    format!("{prefix}[0].{field}"),
                    FormValue::Text(String::new()),
                ));
            }
            return self;
        }
        for (i, item) in items.iter().enumerate() {
            append(
                RowBuilder {
                    form: &mut self,
                    prefix,
                    index: i,
                },
                i,
                item,
            );
        }
        self
    }

    /// Ordered entries, for tests and logging.
    pub fn entries(&self) -> &[(String, FormValue)] {
        &self.entries
    }

    /// First text value stored under `key`.
    pub fn text_value(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|(k, v)| match v {
            FormValue::Text(s) if k == key => Some(s.as_str()),
            _ => None,
        })
    }

    /// Build the transport-level form. Consumes the builder; file parts
    /// carry their original file names.
    pub fn into_form(self) -> Form {
        let mut form = Form::new();
        for (key, value) in self.entries {
            form = match value {
                FormValue::Text(text) => form.text(key, text),
                FormValue::File { file_name, bytes } => {
                    form.part(key, Part::bytes(bytes).file_name(file_name))
                }
            };
        }
        form
    }
}

/// Appends fields of one indexed row (`Prefix[i].field`).
pub struct RowBuilder<'a> {
    form: &'a mut IndexedForm,
    prefix: &'a str,
    index: usize,
}

impl RowBuilder<'_> {
    pub fn text(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.form.entries.push((
            format!("{}[{}].{}", self.prefix, self.index, field),
            FormValue::Text(value.into()),
        ));
        self
    }

    pub fn file(&mut self, field: &str, file_name: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.form.entries.push((
            format!("{}[{}].{}", self.prefix, self.index, field),
            FormValue::File {
                file_name: file_name.into(),
                bytes,
            },
        ));
        self
    }
}
