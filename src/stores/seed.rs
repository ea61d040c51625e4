use crate::types::{Category, CategoryId};

const SEED: [(&str, &str, u32, &str); 6] = [
    (
        "1",
        "Summer Clothes",
        26,
        "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
    (
        "2",
        "Winter Collection",
        42,
        "https://images.unsplash.com/photo-1490481651871-ab68de25d43d?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
    (
        "3",
        "Formal Wear",
        15,
        "https://images.unsplash.com/photo-1525507119028-ed4c629a60a3?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
    (
        "4",
        "Casual Outfits",
        38,
        "https://images.unsplash.com/photo-1542060748-10c28b62716f?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
    (
        "5",
        "Activewear",
        20,
        "https://images.unsplash.com/photo-1539008835657-9e8e9680c956?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
    (
        "6",
        "Accessories",
        53,
        "https://images.unsplash.com/photo-1523170335258-f5ed11844a49?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=720&q=80",
    ),
];

/// Categories installed when nothing usable is persisted.
pub fn default_categories() -> Vec<Category> {
    SEED.iter()
        .map(|(id, name, item_count, image_url)| Category {
            id: CategoryId::new(*id),
            name: name.to_string(),
            item_count: *item_count,
            image_url: image_url.to_string(),
        })
        .collect()
}
