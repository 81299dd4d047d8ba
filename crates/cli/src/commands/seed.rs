//! Sample catalog seeding.
//!
//! Builds a small but representative data set through the same
//! repositories the API uses, so slugs and parent references come out
//! exactly as they would through the HTTP surface. Intended for empty
//! development databases; re-running against seeded data fails on the
//! unique indexes.

use rust_decimal::Decimal;
use sqlx::PgPool;

use copperleaf_api::db::{
    BannerRepository, BrandRepository, CategoryRepository, MenuRepository, ProductRepository,
    SocialLinkRepository,
};
use copperleaf_api::models::banner::NewBanner;
use copperleaf_api::models::brand::NewBrand;
use copperleaf_api::models::category::NewCategory;
use copperleaf_api::models::menu::NewMenu;
use copperleaf_api::models::product::NewProduct;
use copperleaf_api::models::social_link::NewSocialLink;

use super::{CommandError, database_url};

/// Seed the database with a sample catalog.
///
/// # Errors
///
/// Returns `CommandError` if the connection fails or any insert is
/// rejected (typically a unique-index conflict on a non-empty database).
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to catalog database...");
    let pool = PgPool::connect(&database_url).await?;

    seed_catalog(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), CommandError> {
    let brands = BrandRepository::new(pool);
    let categories = CategoryRepository::new(pool);
    let menus = MenuRepository::new(pool);
    let products = ProductRepository::new(pool);
    let banners = BannerRepository::new(pool);
    let social_links = SocialLinkRepository::new(pool);

    tracing::info!("Seeding brands...");
    let acme = brands
        .create(NewBrand {
            name: "Acme Outdoors".to_string(),
            description: Some("Trail-tested gear since 1978".to_string()),
            logo: None,
            is_active: true,
            parent: None,
        })
        .await?;
    brands
        .create(NewBrand {
            name: "Acme Kids".to_string(),
            description: None,
            logo: None,
            is_active: true,
            parent: Some(acme.id),
        })
        .await?;
    let northpeak = brands
        .create(NewBrand {
            name: "Northpeak".to_string(),
            description: Some("Alpine equipment".to_string()),
            logo: None,
            is_active: true,
            parent: None,
        })
        .await?;

    tracing::info!("Seeding categories...");
    let footwear = categories
        .create(NewCategory {
            name: "Footwear".to_string(),
            description: None,
            image: None,
            is_active: true,
            parent: None,
        })
        .await?;
    categories
        .create(NewCategory {
            name: "Trail Runners".to_string(),
            description: None,
            image: None,
            is_active: true,
            parent: Some(footwear.id),
        })
        .await?;
    let apparel = categories
        .create(NewCategory {
            name: "Apparel".to_string(),
            description: None,
            image: None,
            is_active: true,
            parent: None,
        })
        .await?;

    tracing::info!("Seeding menus...");
    let shop = menus
        .create(NewMenu {
            title: "Shop".to_string(),
            link: "/shop".to_string(),
            icon: None,
            sequence: None,
            is_active: true,
            parent: None,
        })
        .await?;
    menus
        .create(NewMenu {
            title: "Footwear".to_string(),
            link: "/shop/footwear".to_string(),
            icon: None,
            sequence: None,
            is_active: true,
            parent: Some(shop.id),
        })
        .await?;
    menus
        .create(NewMenu {
            title: "About".to_string(),
            link: "/about".to_string(),
            icon: None,
            sequence: None,
            is_active: true,
            parent: None,
        })
        .await?;

    tracing::info!("Seeding products...");
    let runner = products
        .create(NewProduct {
            name: "Ridgeline Trail Runner".to_string(),
            description: Some("Lightweight trail running shoe".to_string()),
            price: Decimal::new(12_999, 2),
            images: vec!["/images/ridgeline-1.jpg".to_string()],
            is_active: true,
            brand: Some(acme.id),
            category: Some(footwear.id),
        })
        .await?;
    products
        .create(NewProduct {
            name: "Summit Shell Jacket".to_string(),
            description: Some("Waterproof alpine shell".to_string()),
            price: Decimal::new(24_900, 2),
            images: vec![],
            is_active: true,
            brand: Some(northpeak.id),
            category: Some(apparel.id),
        })
        .await?;

    tracing::info!("Seeding banners...");
    banners
        .create(NewBanner {
            title: "Summer Sale".to_string(),
            image: "/images/banners/summer.jpg".to_string(),
            link: Some("/shop".to_string()),
            is_active: true,
        })
        .await?;
    banners
        .create(NewBanner {
            title: "New Arrivals".to_string(),
            image: "/images/banners/new.jpg".to_string(),
            link: None,
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding social links...");
    social_links
        .create(NewSocialLink {
            platform: "instagram".to_string(),
            url: "https://instagram.com/copperleaf".to_string(),
            icon: None,
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding a sample order...");
    let items = serde_json::json!([
        {
            "product_id": runner.id,
            "name": runner.name,
            "quantity": 1,
            "unit_price": "129.99"
        }
    ]);
    sqlx::query(
        "INSERT INTO orders (order_number, customer_name, customer_email, status, total, items)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind("CL-1001")
    .bind("Dana Reyes")
    .bind("dana@example.com")
    .bind("pending")
    .bind(Decimal::new(12_999, 2))
    .bind(&items)
    .execute(pool)
    .await?;

    Ok(())
}
