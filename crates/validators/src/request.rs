//! The raw request view the validators consume.

/// A framework-independent view of one inbound HTTP request.
///
/// Header names are stored lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RequestContext {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        headers: impl IntoIterator<Item = (String, String)>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(header, _)| *header == wanted)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Path segments with the leading empty segment dropped.
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').skip(1).collect()
    }

    /// The trailing path segment, if the path has more than one segment.
    pub fn target_id(&self) -> Option<&str> {
        let segments = self.path_segments();
        if segments.len() < 2 {
            return None;
        }
        segments.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(path: &str) -> RequestContext {
        RequestContext::new(
            "GET",
            path,
            [("Content-Type".to_owned(), "application/json".to_owned())],
            Vec::new(),
        )
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let ctx = context("/targets");
        assert_eq!(ctx.header("content-type"), Some("application/json"));
        assert_eq!(ctx.header("CONTENT-TYPE"), Some("application/json"));
        assert!(ctx.header("authorization").is_none());
    }

    #[test]
    fn target_id_requires_a_second_segment() {
        assert_eq!(context("/targets").target_id(), None);
        assert_eq!(context("/summary").target_id(), None);
        assert_eq!(context("/targets/abc123").target_id(), Some("abc123"));
        assert_eq!(context("/duplicates/abc123").target_id(), Some("abc123"));
    }
}
