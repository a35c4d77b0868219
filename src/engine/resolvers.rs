//! The three resolvers behind the schema's fields. Each is a pure function of the [`Store`] and
//! its typed arguments, so repeated calls return the same result for the life of the process.
//!
//! [`Store`]: ../store/struct.Store.html

use super::filter::{apply, UsersFilter};
use super::store::{Gender, Store, User};
use log::trace;
use std::sync::Arc;

/// Returns every user that satisfies `filter_opt`, in stored order. With no filter, returns the
/// whole store.
///
/// # Examples
///
/// ```rust
/// use std::convert::TryFrom;
/// use usergraph::engine::config::Configuration;
/// use usergraph::engine::filter::UsersFilter;
/// use usergraph::engine::resolvers::resolve_all;
/// use usergraph::engine::store::{Gender, Store};
///
/// let store = Store::try_from(Configuration::sample()).unwrap();
/// let f = UsersFilter::new(None, Some(Gender::Female));
/// let users = resolve_all(&store, Some(&f));
/// assert_eq!(users[0].name(), "Mary");
/// ```
pub fn resolve_all(store: &Store, filter_opt: Option<&UsersFilter>) -> Vec<Arc<User>> {
    trace!("resolve_all called -- filter_opt: {:?}", filter_opt);
    apply(store.get_all(), filter_opt)
}

/// Returns the user with identifier `id`. A miss is a normal outcome, reported as `None`.
pub fn resolve_by_id(store: &Store, id: &str) -> Option<Arc<User>> {
    trace!("resolve_by_id called -- id: {}", id);
    store.get_by_id(id)
}

/// Returns the children of `parent` whose gender is `gender_opt`, in stored order. With no
/// gender, returns all children.
pub fn resolve_children(
    store: &Store,
    parent: &User,
    gender_opt: Option<Gender>,
) -> Vec<Arc<User>> {
    trace!(
        "resolve_children called -- parent: {}, gender_opt: {:?}",
        parent.id(),
        gender_opt
    );
    let children = store.children(parent);
    match gender_opt {
        None => children,
        Some(g) => apply(&children, Some(&UsersFilter::new(None, Some(g)))),
    }
}
