//! View projections.
//!
//! Each surface of the page (product card, product detail, purchase panel,
//! cart dropdown, cart page, badge) is rendered from a view model computed
//! purely from the catalog, the cart and the store currency. Handlers build
//! the view model and hand it to an askama template; nothing here touches the
//! session.

pub mod cart;
pub mod product;

pub use cart::{
    BadgeView, CartCountTemplate, CartDropdownTemplate, CartItemsTemplate, CartLineView, CartView,
};
pub use product::{
    ProductCardView, ProductDetailView, PurchaseTemplate, PurchaseView, VariationOption,
    featured_cards, product_cards, product_detail, purchase,
};
