mod cart_line;
mod product;

pub use cart_line::{
    cart_total, line_total, AddToCartRequest, CartClearedResponse, CartLine, CartLineDetail,
    LineConfirmation, LineMessageResponse, QuantityUpdate, QuantityUpdatedResponse,
    UpdateQuantityRequest, ADDED_AT_FORMAT, DEFAULT_ADD_QUANTITY,
};
pub use product::{Product, ProductId, PRODUCT_ID_MAX_LEN};
