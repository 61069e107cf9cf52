pub type CharacterId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    pub name: String,
}

/// A counted collection of related resources (comics, events, stories).
///
/// `available_count` is the upstream total and may exceed `items.len()`,
/// since the API only embeds a bounded sample of items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceList {
    pub available_count: i64,
    pub items: Vec<ResourceItem>,
}

impl ResourceList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub series_available_count: i64,
    pub image_path: String,
    pub image_extension: String,
    pub comics: ResourceList,
    pub events: ResourceList,
    pub stories: ResourceList,
}

impl Character {
    /// Thumbnail URL with a plain `http://` scheme upgraded to `https://`.
    pub fn image_url(&self) -> String {
        let url = format!("{}.{}", self.image_path, self.image_extension);
        match url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(path: &str) -> Character {
        Character {
            id: 1,
            name: "Hulk".to_string(),
            series_available_count: 0,
            image_path: path.to_string(),
            image_extension: "jpg".to_string(),
            comics: ResourceList::default(),
            events: ResourceList::default(),
            stories: ResourceList::default(),
        }
    }

    #[test]
    fn image_url_upgrades_http_scheme() {
        assert_eq!(
            character("http://i.annihil.us/u/prod/hulk").image_url(),
            "https://i.annihil.us/u/prod/hulk.jpg"
        );
    }

    #[test]
    fn image_url_keeps_https_untouched() {
        assert_eq!(
            character("https://cdn.example.com/hulk").image_url(),
            "https://cdn.example.com/hulk.jpg"
        );
    }
}
