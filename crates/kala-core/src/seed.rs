//! # Seed Catalog
//!
//! The four launch products the catalog starts from when nothing has been
//! persisted yet. Ids are the fixed strings `"1"` to `"4"`.

use crate::types::{Product, Review};

fn pexels(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=800"
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn review(id: &str, name: &str, rating: u8, comment: &str, date: &str) -> Review {
    Review {
        id: id.to_string(),
        name: name.to_string(),
        rating,
        comment: comment.to_string(),
        date: date.to_string(),
    }
}

/// Launch catalog, in display order.
pub fn initial_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Elegant Floral Kurti".to_string(),
            price: 2499,
            images: vec![pexels(7679720), pexels(7679721)],
            category: "Kurtis & Dresses".to_string(),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Navy Blue", "Coral Pink", "Mint Green"]),
            description: "Beautiful handcrafted kurti with intricate floral embroidery, perfect \
                for both casual and festive occasions."
                .to_string(),
            reviews: vec![
                review(
                    "1",
                    "Priya Sharma",
                    5,
                    "Absolutely love this kurti! The quality is amazing and fits perfectly.",
                    "2024-01-15",
                ),
                review(
                    "2",
                    "Anjali Singh",
                    4,
                    "Beautiful design and comfortable fabric. Great purchase!",
                    "2024-01-10",
                ),
            ],
            featured: true,
            stock: 15,
        },
        Product {
            id: "2".to_string(),
            name: "Contemporary Co-ord Set".to_string(),
            price: 3299,
            images: vec![pexels(7679722), pexels(7679723)],
            category: "Co-ord Sets".to_string(),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Black", "Burgundy", "Emerald Green"]),
            description: "Modern co-ord set with contemporary prints, perfect for office wear \
                and casual outings."
                .to_string(),
            reviews: vec![review(
                "3",
                "Sneha Patel",
                5,
                "Perfect fit and amazing quality! Highly recommended.",
                "2024-01-12",
            )],
            featured: true,
            stock: 8,
        },
        Product {
            id: "3".to_string(),
            name: "Festive Silk Dress".to_string(),
            price: 4999,
            images: vec![pexels(7679724)],
            category: "Festive Wear".to_string(),
            sizes: strings(&["S", "M", "L", "XL", "XXL"]),
            colors: strings(&["Royal Blue", "Golden Yellow", "Deep Red"]),
            description: "Luxurious silk dress with gold thread work, ideal for weddings and \
                special occasions."
                .to_string(),
            reviews: vec![],
            featured: false,
            stock: 5,
        },
        Product {
            id: "4".to_string(),
            name: "Handcrafted Bohemian Top".to_string(),
            price: 1899,
            images: vec![pexels(7679725)],
            category: "Handcrafted Pieces".to_string(),
            sizes: strings(&["S", "M", "L"]),
            colors: strings(&["Beige", "Terracotta", "Olive Green"]),
            description: "Unique handcrafted bohemian top with traditional block prints and \
                modern silhouette."
                .to_string(),
            reviews: vec![review(
                "4",
                "Kavya Reddy",
                4,
                "Unique design and good quality. Love the handcrafted details.",
                "2024-01-08",
            )],
            featured: true,
            stock: 12,
        },
    ]
}
