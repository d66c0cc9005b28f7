use crate::shared::DomainError;
use crate::user::User;

/// Purchase rules shared by mascots and accessories
pub struct ShopDomainService;

impl ShopDomainService {
    /// Charge `user` for an item.
    ///
    /// Fails with `AlreadyOwned` before looking at the balance, and leaves the
    /// user untouched on any error.
    pub fn charge(
        user: &mut User,
        item_name: &str,
        price: i64,
        already_owned: bool,
    ) -> Result<i64, DomainError> {
        if already_owned {
            return Err(DomainError::AlreadyOwned(item_name.to_string()));
        }
        user.spend_cash(price)?;
        Ok(user.cash())
    }
}
