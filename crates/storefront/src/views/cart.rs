//! Cart dropdown, cart page and badge projections.

use askama::Template;
use askama_web::WebTemplate;
use repuestos_core::{Cart, CurrencyCode};

/// Cart line display data for templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLineView {
    /// Position in the cart; the mutation routes address lines by it.
    pub index: usize,
    pub product_id: String,
    pub name: String,
    pub variation: Option<String>,
    pub image: String,
    pub price: String,
    pub line_total: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Project a cart for display.
    #[must_use]
    pub fn project(cart: &Cart, currency: CurrencyCode) -> Self {
        let lines = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartLineView {
                index,
                product_id: line.id.to_string(),
                name: line.name.clone(),
                variation: line.variation.clone(),
                image: line.image.clone(),
                price: currency.format(line.price),
                line_total: currency.format(line.line_total()),
                quantity: line.quantity.get(),
            })
            .collect();

        Self {
            lines,
            subtotal: currency.format(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart counter badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub count: u32,
}

impl BadgeView {
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        Self {
            count: cart.total_quantity(),
        }
    }

    /// The badge is not shown for an empty cart.
    #[must_use]
    pub const fn hidden(&self) -> bool {
        self.count == 0
    }
}

/// Cart dropdown fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_dropdown.html")]
pub struct CartDropdownTemplate {
    pub cart: CartView,
}

/// Cart page items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: BadgeView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use repuestos_core::{NewLine, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn line(id: &str, price: i64, variation: Option<&str>) -> NewLine {
        NewLine {
            product_id: ProductId::new(id),
            name: format!("Producto {id}"),
            price: Decimal::from(price),
            image: "/static/images/repuesto.svg".to_string(),
            variation: variation.map(str::to_string),
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(line("bujia", 3990, None));
        cart.add_line(line("bujia", 3990, None));
        cart.add_line(line("neumatico", 42990, Some("175/65 R14")));
        cart
    }

    #[test]
    fn test_project_cart() {
        let view = CartView::project(&sample_cart(), CurrencyCode::CLP);

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$50.970");
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].index, 0);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].price, "$3.990");
        assert_eq!(view.lines[0].line_total, "$7.980");
        assert_eq!(view.lines[1].index, 1);
        assert_eq!(view.lines[1].variation.as_deref(), Some("175/65 R14"));
    }

    #[test]
    fn test_badge_count_and_visibility() {
        let badge = BadgeView::project(&sample_cart());
        assert_eq!(badge.count, 3);
        assert!(!badge.hidden());

        let badge = BadgeView::project(&Cart::new());
        assert_eq!(badge.count, 0);
        assert!(badge.hidden());
    }

    #[test]
    fn test_empty_cart_renders_empty_state() {
        let cart = CartView::project(&Cart::new(), CurrencyCode::CLP);

        let dropdown = CartDropdownTemplate { cart: cart.clone() }.render().unwrap();
        assert!(dropdown.contains("Carrito vacío"));
        assert!(dropdown.contains(r#"href="/cart""#));

        let items = CartItemsTemplate { cart }.render().unwrap();
        assert!(items.contains("Carrito vacío"));
        assert!(!items.contains("cart-item-page"));
    }

    #[test]
    fn test_dropdown_renders_lines_and_controls() {
        let cart = CartView::project(&sample_cart(), CurrencyCode::CLP);
        let html = CartDropdownTemplate { cart }.render().unwrap();

        assert!(html.contains("Producto bujia"));
        assert!(html.contains("175/65 R14"));
        assert!(html.contains("/cart/increment"));
        assert!(html.contains("/cart/decrement"));
        assert!(html.contains("/cart/remove"));
        assert!(!html.contains("Carrito vacío"));
    }

    #[test]
    fn test_badge_fragment_hidden_when_empty() {
        let html = CartCountTemplate {
            badge: BadgeView { count: 0 },
        }
        .render()
        .unwrap();
        assert!(html.contains("cart-counter"));
        assert!(html.contains("hidden"));

        let html = CartCountTemplate {
            badge: BadgeView { count: 4 },
        }
        .render()
        .unwrap();
        assert!(html.contains(">4<"));
        assert!(!html.contains("hidden"));
    }
}
