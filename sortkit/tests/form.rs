use std::sync::Arc;

use domlet::{Document, Event, LayoutResult, MouseButton, Rect, RenderSurface};
use sortkit::Error;
use sortkit::form::{
    Category, FormEvent, FormField, MemoryProductStore, NOT_FOUND, ProductData, ProductForm,
    ProductImage, StoreCall, Subcategory,
};
use sortkit::source::FetchError;

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "home".into(),
            title: "Home".into(),
            subcategories: vec![
                Subcategory {
                    id: "lamps".into(),
                    title: "Lamps".into(),
                },
                Subcategory {
                    id: "rugs".into(),
                    title: "Rugs".into(),
                },
            ],
        },
        Category {
            id: "garden".into(),
            title: "Garden".into(),
            subcategories: vec![Subcategory {
                id: "tools".into(),
                title: "Tools".into(),
            }],
        },
    ]
}

fn lamp() -> ProductData {
    ProductData {
        id: Some("lamp-1".into()),
        title: "Desk lamp".into(),
        description: "Warm light".into(),
        quantity: 3,
        subcategory: "lamps".into(),
        status: 1,
        price: 40,
        discount: 5,
        images: vec![
            ProductImage::new("https://img/1.png", "front.png"),
            ProductImage::new("https://img/2.png", "side.png"),
            ProductImage::new("https://img/3.png", "back.png"),
        ],
    }
}

struct Fixture {
    store: MemoryProductStore,
    form: ProductForm,
    doc: Document,
    images: Document,
}

fn fixture(product_id: Option<&str>) -> Fixture {
    let store = MemoryProductStore::new(categories()).with_product(lamp());
    let (doc, images) = (Document::new(), Document::new());
    let form = ProductForm::new(
        Arc::new(store.clone()),
        product_id.map(String::from),
        doc.clone(),
        images.clone(),
    );
    Fixture {
        store,
        form,
        doc,
        images,
    }
}

fn sources(form: &ProductForm) -> Vec<String> {
    form.images().into_iter().map(|image| image.source).collect()
}

fn layout(doc: &Document) -> LayoutResult {
    doc.layout(Rect::new(0, 0, 80, 100))
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_render_fills_fields_from_product() {
    let f = fixture(Some("lamp-1"));

    f.form.render().await.unwrap();

    assert_eq!(f.form.field(FormField::Title).as_deref(), Some("Desk lamp"));
    assert_eq!(f.form.field(FormField::Price).as_deref(), Some("40"));
    assert_eq!(f.doc.element("title").unwrap().text_content(), "Desk lamp");
    assert_eq!(sources(&f.form), vec!["front.png", "side.png", "back.png"]);
    assert_eq!(
        f.store.calls()[..2],
        [StoreCall::Categories, StoreCall::Product("lamp-1".into())]
    );
}

#[tokio::test]
async fn test_new_product_uses_defaults() {
    let f = fixture(None);

    f.form.render().await.unwrap();

    let data = f.form.form_data().unwrap();
    assert_eq!(data.id, None);
    assert_eq!((data.quantity, data.status, data.price), (1, 1, 100));
    assert_eq!(data.subcategory, "lamps");
    assert!(f.images.is_mounted());
    assert_eq!(f.store.calls(), vec![StoreCall::Categories]);
}

#[tokio::test]
async fn test_subcategory_options_name_their_category() {
    let f = fixture(None);
    f.form.render().await.unwrap();

    let labels: Vec<String> = f
        .form
        .subcategory_options()
        .into_iter()
        .map(|(_, label)| label)
        .collect();

    assert_eq!(labels, vec!["Home > Lamps", "Home > Rugs", "Garden > Tools"]);
}

#[tokio::test]
async fn test_unknown_product_shows_not_found() {
    let f = fixture(Some("missing"));

    let result = f.form.render().await;

    assert_eq!(result, Err(Error::NotFound("missing".into())));
    assert!(f.doc.region(NOT_FOUND).is_some());
}

// ============================================================================
// Payload
// ============================================================================

#[tokio::test]
async fn test_form_data_parses_numeric_fields() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();

    f.form.set_field(FormField::Quantity, "12 pcs").unwrap();
    f.form.set_field(FormField::Discount, "none").unwrap();
    f.form.set_field(FormField::Subcategory, "tools").unwrap();
    f.form.set_field(FormField::Title, "Floor lamp").unwrap();

    let data = f.form.form_data().unwrap();
    assert_eq!(data.id.as_deref(), Some("lamp-1"));
    assert_eq!(data.title, "Floor lamp");
    assert_eq!(data.quantity, 12);
    assert_eq!(data.discount, 0);
    assert_eq!(data.subcategory, "tools");
    assert_eq!(data.images.len(), 3);
}

#[tokio::test]
async fn test_added_and_removed_images_shape_payload() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();

    f.form
        .add_image(&ProductImage::new("https://img/4.png", "top.png"))
        .unwrap();
    let removed = f.form.remove_image(0).unwrap();

    assert_eq!(removed.source, "front.png");
    assert_eq!(sources(&f.form), vec!["side.png", "back.png", "top.png"]);
    assert!(matches!(f.form.remove_image(9), Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_image_order_follows_drag() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();

    // Each image is three rows tall; front.png's grab handle is row 1.
    let down = Event::PointerDown {
        x: 1,
        y: 1,
        button: MouseButton::Left,
    };
    f.form.handle_event(&down, &layout(&f.images)).unwrap();
    f.form
        .handle_event(&Event::PointerMove { x: 1, y: 20 }, &layout(&f.images))
        .unwrap();
    f.form
        .handle_event(&Event::PointerUp { x: 1, y: 20 }, &layout(&f.images))
        .unwrap();

    let data = f.form.form_data().unwrap();
    let urls: Vec<&str> = data.images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://img/2.png", "https://img/3.png", "https://img/1.png"]
    );
}

#[tokio::test]
async fn test_delete_handle_drops_image() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();

    // side.png spans rows 3..6; its delete handle is row 5.
    let down = Event::PointerDown {
        x: 1,
        y: 5,
        button: MouseButton::Left,
    };
    f.form.handle_event(&down, &layout(&f.images)).unwrap();

    assert_eq!(sources(&f.form), vec!["front.png", "back.png"]);
}

// ============================================================================
// Saving
// ============================================================================

#[tokio::test]
async fn test_save_new_product_creates_it() {
    let f = fixture(None);
    f.form.render().await.unwrap();
    f.form.set_field(FormField::Title, "Rake").unwrap();

    let event = f.form.save().await.unwrap();

    let FormEvent::ProductSaved(product) = event else {
        panic!("expected a created product");
    };
    assert_eq!(product.title, "Rake");
    let id = product.id.clone().unwrap();
    assert_eq!(f.store.product_by_id(&id), Some(product));
    assert!(matches!(f.store.calls().last(), Some(StoreCall::Create(p)) if p.id.is_none()));
}

#[tokio::test]
async fn test_save_existing_product_updates_it() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();
    f.form.set_field(FormField::Price, "55").unwrap();

    let event = f.form.save().await.unwrap();

    assert!(matches!(&event, FormEvent::ProductUpdated(p) if p.price == 55));
    assert_eq!(f.store.product_by_id("lamp-1").unwrap().price, 55);
    assert!(matches!(f.store.calls().last(), Some(StoreCall::Update(_))));
}

#[tokio::test]
async fn test_failed_save_keeps_form_values() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();
    f.form.set_field(FormField::Title, "Edited").unwrap();

    f.store.fail_next(FetchError::server(500, "Internal Server Error"));
    let result = f.form.save().await;

    assert!(matches!(result, Err(Error::DataSource(_))));
    assert_eq!(f.form.field(FormField::Title).as_deref(), Some("Edited"));
    assert_eq!(f.store.product_by_id("lamp-1").unwrap().title, "Desk lamp");
}

#[tokio::test]
async fn test_destroy_unmounts_form_and_images() {
    let f = fixture(Some("lamp-1"));
    f.form.render().await.unwrap();

    f.form.destroy();

    assert!(!f.doc.is_mounted());
    assert!(!f.images.is_mounted());
    assert!(matches!(f.form.save().await, Err(Error::InvalidState(_))));
}
