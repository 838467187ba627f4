use serde::{Deserialize, Serialize};

/// One page of a backend listing (`Page<T>` in the backend's JSON).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub size: usize,
    /// Zero-based page index.
    #[serde(default)]
    pub number: usize,
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size: 0,
            number: 0,
        }
    }
}

impl<T> PageResponse<T> {
    /// Checks the shape guarantees the backend promises for a page.
    pub fn is_consistent(&self) -> bool {
        self.content.len() <= self.size
            && (self.total_elements == 0 || self.number < self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_spring_page() {
        let page: PageResponse<u32> = serde_json::from_value(json!({
            "content": [1, 2],
            "totalElements": 12,
            "totalPages": 6,
            "size": 2,
            "number": 3,
            "pageable": {}
        }))
        .unwrap();

        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_pages, 6);
        assert!(page.is_consistent());
    }

    #[test]
    fn detects_inconsistent_pages() {
        let overfull = PageResponse {
            content: vec![1, 2, 3],
            total_elements: 3,
            total_pages: 1,
            size: 2,
            number: 0,
        };
        assert!(!overfull.is_consistent());

        let past_end = PageResponse::<u32> {
            content: vec![],
            total_elements: 3,
            total_pages: 1,
            size: 2,
            number: 1,
        };
        assert!(!past_end.is_consistent());

        assert!(PageResponse::<u32>::default().is_consistent());
    }
}
