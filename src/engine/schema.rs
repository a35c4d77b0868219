//! This module provides the schema description of the service. The description is a static
//! declaration of the `User` type, its `Gender` enumeration, the `UsersFilter` input, and the
//! root query operations. Every field carries a [`PropertyKind`] that routes it to exactly one
//! resolver or attribute read. The description is built once at startup, validated, and turned
//! into the Juniper root node that executes queries.
//!
//! [`PropertyKind`]: ./enum.PropertyKind.html

use super::context::GraphQLContext;
use super::objects::Node;
use super::store::Gender;
use crate::error::Error;
use juniper::{EmptyMutation, EmptySubscription, RootNode};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Values;
use std::collections::HashMap;
use std::panic::catch_unwind;
use std::sync::Arc;

pub(crate) const QUERY_TYPE: &str = "Query";
pub(crate) const USER_TYPE: &str = "User";
pub(crate) const USERS_FILTER_TYPE: &str = "UsersFilter";
pub(crate) const GENDER_TYPE: &str = "Gender";

const SCALARS: [&str; 2] = ["ID", "String"];

/// Carries the type information in the GraphQL schema, derived from the [`Schema`] description
/// used to set up the [`Engine`]. Used by the Juniper object types to look up the fields they
/// expose and how each one resolves.
///
/// [`Schema`]: ./struct.Schema.html
/// [`Engine`]: ../struct.Engine.html
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    name: String,
    type_defs: Arc<HashMap<String, NodeType>>,
}

impl Info {
    pub(crate) fn new(name: String, type_defs: Arc<HashMap<String, NodeType>>) -> Info {
        Info { name, type_defs }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn type_def(&self) -> Result<&NodeType, Error> {
        self.type_def_by_name(&self.name)
    }

    pub(crate) fn type_def_by_name(&self, name: &str) -> Result<&NodeType, Error> {
        self.type_defs
            .get(name)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: name.to_string(),
            })
    }

    pub(crate) fn type_defs(&self) -> Arc<HashMap<String, NodeType>> {
        self.type_defs.clone()
    }
}

pub(super) type RootRef =
    Arc<RootNode<'static, Node, EmptyMutation<GraphQLContext>, EmptySubscription<GraphQLContext>>>;

#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ArgumentKind {
    Required,
    Optional,
}

/// Determines how a field is resolved
#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum PropertyKind {
    /// Attribute of a user with a built-in scalar type
    Scalar,
    /// Attribute of a user with an enumeration type
    Enum,
    /// Field of an input type
    Input,
    /// Root query returning every user matching an optional filter
    UsersQuery,
    /// Root query returning a single user by identifier
    UserQuery,
    /// Relationship from a user to its children, optionally narrowed by gender
    ChildrenRel,
}

impl PropertyKind {
    fn is_resolver(&self) -> bool {
        matches!(
            self,
            PropertyKind::UsersQuery | PropertyKind::UserQuery | PropertyKind::ChildrenRel
        )
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TypeKind {
    Enum,
    Input,
    Object,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct NodeType {
    props: HashMap<String, Property>,
    type_kind: TypeKind,
    type_name: String,
    enum_values: Option<Vec<String>>,
}

impl NodeType {
    fn new(type_name: String, type_kind: TypeKind, props: HashMap<String, Property>) -> NodeType {
        NodeType {
            props,
            type_kind,
            type_name,
            enum_values: None,
        }
    }

    pub(crate) fn property(&self, property_name: &str) -> Result<&Property, Error> {
        self.props
            .get(property_name)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: self.type_name.to_string() + "::" + property_name,
            })
    }

    pub fn props(&self) -> Values<'_, String, Property> {
        self.props.values()
    }

    /// Returns the properties sorted by name
    pub fn sorted_props(&self) -> Vec<&Property> {
        let mut props = self.props.values().collect::<Vec<&Property>>();
        props.sort_by_key(|p| p.name());
        props
    }

    pub fn type_kind(&self) -> &TypeKind {
        &self.type_kind
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }

    fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    name: String,
    kind: PropertyKind,
    type_name: String,
    list: bool,
    arguments: HashMap<String, Argument>,
}

impl Property {
    fn new(name: String, kind: PropertyKind, type_name: String) -> Property {
        Property {
            name,
            kind,
            type_name,
            list: false,
            arguments: HashMap::new(),
        }
    }

    pub fn arguments(&self) -> Values<'_, String, Argument> {
        self.arguments.values()
    }

    /// Returns the arguments sorted by name
    pub fn sorted_arguments(&self) -> Vec<&Argument> {
        let mut args = self.arguments.values().collect::<Vec<&Argument>>();
        args.sort_by_key(|a| a.name());
        args
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn list(&self) -> bool {
        self.list
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments
            .into_iter()
            .map(|a| (a.name.to_string(), a))
            .collect();
        self
    }

    fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Argument {
    name: String,
    kind: ArgumentKind,
    type_name: String,
}

impl Argument {
    fn new(name: String, kind: ArgumentKind, type_name: String) -> Argument {
        Argument {
            name,
            kind,
            type_name,
        }
    }

    pub fn kind(&self) -> &ArgumentKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Immutable description of the GraphQL schema served by the engine
///
/// # Examples
///
/// ```rust
/// use usergraph::engine::schema::describe;
///
/// let schema = describe();
/// assert!(schema.validate().is_ok());
/// println!("{}", schema.to_sdl());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    type_defs: Arc<HashMap<String, NodeType>>,
}

impl Schema {
    fn new(type_defs: HashMap<String, NodeType>) -> Schema {
        Schema {
            type_defs: Arc::new(type_defs),
        }
    }

    pub fn type_def(&self, name: &str) -> Option<&NodeType> {
        self.type_defs.get(name)
    }

    /// Returns the names of all types in the description, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names = self
            .type_defs
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        names.sort_unstable();
        names
    }

    pub(crate) fn type_defs(&self) -> Arc<HashMap<String, NodeType>> {
        self.type_defs.clone()
    }

    /// Checks that the description is internally consistent: every referenced type exists and
    /// is of a kind that fits where it is used, resolver fields are declared only on the type
    /// they resolve from, and each resolver is reached by exactly one field.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] variant [`SchemaItemNotFound`] if a referenced type is missing, or
    /// [`SchemaItemInvalid`] if an element is misplaced or a resolver is not routed to exactly
    /// once.
    ///
    /// [`Error`]: ../../error/enum.Error.html
    /// [`SchemaItemNotFound`]: ../../error/enum.Error.html#variant.SchemaItemNotFound
    /// [`SchemaItemInvalid`]: ../../error/enum.Error.html#variant.SchemaItemInvalid
    pub fn validate(&self) -> Result<(), Error> {
        let query = self
            .type_defs
            .get(QUERY_TYPE)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: QUERY_TYPE.to_string(),
            })?;
        if query.type_kind != TypeKind::Object {
            return invalid(QUERY_TYPE, "the root query must be an object type");
        }

        let mut routes: HashMap<PropertyKind, usize> = HashMap::new();
        for nt in self.type_defs.values() {
            match nt.type_kind {
                TypeKind::Enum => {
                    if nt.enum_values().map_or(true, |vs| vs.is_empty()) || !nt.props.is_empty() {
                        return invalid(&nt.type_name, "an enum must list values and no fields");
                    }
                }
                TypeKind::Input => {
                    for p in nt.props.values() {
                        if p.kind != PropertyKind::Input || !p.arguments.is_empty() {
                            return invalid(
                                &field_name(nt, p),
                                "input types hold only input fields without arguments",
                            );
                        }
                        self.validate_property_type(nt, p)?;
                    }
                }
                TypeKind::Object => {
                    for p in nt.props.values() {
                        self.validate_placement(nt, p)?;
                        self.validate_property_type(nt, p)?;
                        for a in p.arguments.values() {
                            self.validate_argument_type(nt, p, a)?;
                        }
                        if p.kind.is_resolver() {
                            *routes.entry(p.kind).or_insert(0) += 1;
                        }
                    }
                }
            }
        }

        for kind in &[
            PropertyKind::UsersQuery,
            PropertyKind::UserQuery,
            PropertyKind::ChildrenRel,
        ] {
            let count = routes.get(kind).copied().unwrap_or(0);
            if count != 1 {
                return invalid(
                    &format!("{:?}", kind),
                    &format!("resolver must be reached by exactly one field, found {}", count),
                );
            }
        }

        Ok(())
    }

    fn validate_placement(&self, nt: &NodeType, p: &Property) -> Result<(), Error> {
        let on_root = nt.type_name == QUERY_TYPE;
        match p.kind {
            PropertyKind::UsersQuery | PropertyKind::UserQuery if !on_root => invalid(
                &field_name(nt, p),
                "root queries must be declared on the query type",
            ),
            PropertyKind::ChildrenRel if nt.type_name != USER_TYPE || p.type_name != USER_TYPE => {
                invalid(
                    &field_name(nt, p),
                    "children must be declared on, and list, the user type",
                )
            }
            PropertyKind::Scalar | PropertyKind::Enum if on_root => invalid(
                &field_name(nt, p),
                "attributes cannot be declared on the query type",
            ),
            PropertyKind::Input => invalid(
                &field_name(nt, p),
                "input fields can only be declared on input types",
            ),
            _ => Ok(()),
        }
    }

    fn validate_property_type(&self, nt: &NodeType, p: &Property) -> Result<(), Error> {
        let expected = match p.kind {
            PropertyKind::Scalar => {
                if SCALARS.contains(&p.type_name.as_str()) {
                    return Ok(());
                }
                return invalid(&field_name(nt, p), "scalar fields need a built-in scalar type");
            }
            PropertyKind::Enum => TypeKind::Enum,
            PropertyKind::Input => {
                if SCALARS.contains(&p.type_name.as_str()) {
                    return Ok(());
                }
                return self.validate_input_field_type(&p.type_name);
            }
            PropertyKind::UsersQuery | PropertyKind::UserQuery | PropertyKind::ChildrenRel => {
                TypeKind::Object
            }
        };
        self.expect_kind(&p.type_name, expected)
    }

    fn validate_argument_type(
        &self,
        nt: &NodeType,
        p: &Property,
        a: &Argument,
    ) -> Result<(), Error> {
        if SCALARS.contains(&a.type_name.as_str()) {
            return Ok(());
        }
        let at = self
            .type_defs
            .get(&a.type_name)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: a.type_name.to_string(),
            })?;
        match at.type_kind {
            TypeKind::Enum | TypeKind::Input => Ok(()),
            TypeKind::Object => invalid(
                &(field_name(nt, p) + "(" + a.name.as_str() + ")"),
                "arguments cannot be object types",
            ),
        }
    }

    fn validate_input_field_type(&self, type_name: &str) -> Result<(), Error> {
        let t = self
            .type_defs
            .get(type_name)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: type_name.to_string(),
            })?;
        match t.type_kind {
            TypeKind::Enum | TypeKind::Input => Ok(()),
            TypeKind::Object => invalid(type_name, "input fields cannot be object types"),
        }
    }

    fn expect_kind(&self, type_name: &str, expected: TypeKind) -> Result<(), Error> {
        let t = self
            .type_defs
            .get(type_name)
            .ok_or_else(|| Error::SchemaItemNotFound {
                name: type_name.to_string(),
            })?;
        if t.type_kind == expected {
            Ok(())
        } else {
            invalid(type_name, &format!("expected a type of kind {:?}", expected))
        }
    }

    /// Prints the description as GraphQL SDL. Types and fields are sorted by name, and enum
    /// values keep their declared order.
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();
        for name in self.type_names() {
            let nt = &self.type_defs[name];
            match nt.type_kind {
                TypeKind::Enum => {
                    sdl.push_str(&format!("enum {} {{\n", name));
                    for v in nt.enum_values().unwrap_or(&[]) {
                        sdl.push_str(&format!("  {}\n", v));
                    }
                }
                TypeKind::Input | TypeKind::Object => {
                    let keyword = if nt.type_kind == TypeKind::Input {
                        "input"
                    } else {
                        "type"
                    };
                    sdl.push_str(&format!("{} {} {{\n", keyword, name));
                    for p in nt.sorted_props() {
                        sdl.push_str(&format!("  {}\n", fmt_sdl_field(p)));
                    }
                }
            }
            sdl.push_str("}\n\n");
        }
        sdl.truncate(sdl.trim_end().len());
        sdl.push('\n');
        sdl
    }
}

fn invalid<T>(name: &str, reason: &str) -> Result<T, Error> {
    Err(Error::SchemaItemInvalid {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

fn field_name(nt: &NodeType, p: &Property) -> String {
    nt.type_name.to_string() + "::" + p.name.as_str()
}

fn fmt_sdl_field(p: &Property) -> String {
    let args = p
        .sorted_arguments()
        .iter()
        .map(|a| match a.kind {
            ArgumentKind::Required => format!("{}: {}!", a.name, a.type_name),
            ArgumentKind::Optional => format!("{}: {}", a.name, a.type_name),
        })
        .collect::<Vec<String>>();
    let args = if args.is_empty() {
        String::new()
    } else {
        format!("({})", args.join(", "))
    };
    let type_name = if p.list {
        format!("[{}]", p.type_name)
    } else {
        p.type_name.to_string()
    };
    format!("{}{}: {}", p.name, args, type_name)
}

/// Returns a NodeType representing the gender enumeration
///
/// Format:
/// enum Gender {
///     MALE
///     FEMALE
///     OTHER
/// }
fn generate_gender_enum() -> NodeType {
    NodeType::new(GENDER_TYPE.to_string(), TypeKind::Enum, HashMap::new()).with_enum_values(
        Gender::values()
            .iter()
            .map(|g| g.as_str().to_string())
            .collect(),
    )
}

/// Returns a NodeType representing the filter accepted by the users query
///
/// Format:
/// input UsersFilter {
///     email: String
///     gender: Gender
/// }
fn generate_users_filter_input() -> NodeType {
    let mut props = HashMap::new();
    props.insert(
        "email".to_string(),
        Property::new("email".to_string(), PropertyKind::Input, "String".to_string()),
    );
    props.insert(
        "gender".to_string(),
        Property::new("gender".to_string(), PropertyKind::Input, GENDER_TYPE.to_string()),
    );

    NodeType::new(USERS_FILTER_TYPE.to_string(), TypeKind::Input, props)
}

/// Returns a NodeType representing a user
///
/// Format:
/// type User {
///     children(gender: Gender): [User]
///     email: String
///     gender: Gender
///     id: String
///     name: String
/// }
fn generate_user_object() -> NodeType {
    let mut props = HashMap::new();
    for name in &["id", "name", "email"] {
        props.insert(
            name.to_string(),
            Property::new(name.to_string(), PropertyKind::Scalar, "String".to_string()),
        );
    }
    props.insert(
        "gender".to_string(),
        Property::new("gender".to_string(), PropertyKind::Enum, GENDER_TYPE.to_string()),
    );
    props.insert(
        "children".to_string(),
        Property::new(
            "children".to_string(),
            PropertyKind::ChildrenRel,
            USER_TYPE.to_string(),
        )
        .with_list(true)
        .with_arguments(vec![Argument::new(
            "gender".to_string(),
            ArgumentKind::Optional,
            GENDER_TYPE.to_string(),
        )]),
    );

    NodeType::new(USER_TYPE.to_string(), TypeKind::Object, props)
}

/// Returns a Property representing the query for all users
///
/// Format:
/// getUsers(filter: UsersFilter): [User]
fn generate_users_query() -> Property {
    Property::new(
        "getUsers".to_string(),
        PropertyKind::UsersQuery,
        USER_TYPE.to_string(),
    )
    .with_list(true)
    .with_arguments(vec![Argument::new(
        "filter".to_string(),
        ArgumentKind::Optional,
        USERS_FILTER_TYPE.to_string(),
    )])
}

/// Returns a Property representing the query for a single user
///
/// Format:
/// getUser(id: String): User
fn generate_user_query() -> Property {
    Property::new(
        "getUser".to_string(),
        PropertyKind::UserQuery,
        USER_TYPE.to_string(),
    )
    .with_arguments(vec![Argument::new(
        "id".to_string(),
        ArgumentKind::Optional,
        "String".to_string(),
    )])
}

/// Returns a map of graphql schema components for the user model and the root query
fn generate_schema() -> HashMap<String, NodeType> {
    let mut nthm = HashMap::new();

    for nt in vec![
        generate_gender_enum(),
        generate_users_filter_input(),
        generate_user_object(),
    ] {
        nthm.insert(nt.type_name.to_string(), nt);
    }

    let mut query_props = HashMap::new();
    for p in vec![generate_users_query(), generate_user_query()] {
        query_props.insert(p.name.to_string(), p);
    }
    nthm.insert(
        QUERY_TYPE.to_string(),
        NodeType::new(QUERY_TYPE.to_string(), TypeKind::Object, query_props),
    );

    nthm
}

/// Returns the schema description of the service. The description is static, so calling this
/// more than once yields equal values.
pub fn describe() -> Schema {
    Schema::new(generate_schema())
}

/// Takes a schema description and returns the Juniper RootNode for a GraphQL schema that
/// matches it.
///
/// # Errors
///
/// Returns an [`Error`] if the description is invalid, or if Juniper fails to find a type the
/// description references while building the schema.
///
/// [`Error`]: ../../error/enum.Error.html
pub(super) fn create_root_node(schema: &Schema) -> Result<RootRef, Error> {
    schema.validate()?;

    let root_query_info = Info::new(QUERY_TYPE.to_string(), schema.type_defs());
    catch_unwind(|| {
        Arc::new(RootNode::new_with_info(
            Node::root(),
            EmptyMutation::<GraphQLContext>::new(),
            EmptySubscription::<GraphQLContext>::new(),
            root_query_info,
            (),
            (),
        ))
    })
    .map_err(|e| {
        error!("create_root_node failed to build the Juniper schema");
        e.downcast::<Error>()
            .map(|e| *e)
            .unwrap_or_else(|e| Error::SchemaItemNotFound {
                name: format!("{:#?}", e),
            })
    })
    .map(|root| {
        debug!("create_root_node -- built root node");
        root
    })
}

#[cfg(test)]
mod tests {
    use super::{
        create_root_node, describe, generate_gender_enum, generate_user_object,
        generate_users_filter_input, generate_users_query, Argument, ArgumentKind, Info,
        NodeType, Property, PropertyKind, Schema, TypeKind, QUERY_TYPE, USER_TYPE,
    };
    use crate::Error;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Passes if a new Info struct is created
    #[test]
    fn info_new() {
        let i = Info::new("typename".to_string(), Arc::new(HashMap::new()));

        assert!(i.name == "typename");
    }

    /// Passes if a lookup of an unknown type fails
    #[test]
    fn type_lookup_error() {
        let i = Info::new("Project".to_string(), Arc::new(HashMap::new()));

        assert!(matches!(i.type_def(), Err(Error::SchemaItemNotFound { .. })));
    }

    /// Passes if the enum lists the gender values in declared order
    #[test]
    fn test_generate_gender_enum() {
        let nt = generate_gender_enum();

        assert_eq!(nt.type_kind(), &TypeKind::Enum);
        assert_eq!(
            nt.enum_values().unwrap(),
            &["MALE".to_string(), "FEMALE".to_string(), "OTHER".to_string()]
        );
    }

    /// Passes if the filter input carries the two optional conditions
    #[test]
    fn test_generate_users_filter_input() {
        let nt = generate_users_filter_input();

        assert_eq!(nt.type_kind(), &TypeKind::Input);
        assert_eq!(nt.property("email").unwrap().kind(), &PropertyKind::Input);
        assert_eq!(nt.property("gender").unwrap().kind(), &PropertyKind::Input);
        assert_eq!(nt.props().count(), 2);
    }

    /// Passes if the user object routes children to the children resolver
    #[test]
    fn test_generate_user_object() {
        let nt = generate_user_object();

        assert_eq!(nt.type_name(), USER_TYPE);
        let names: Vec<&str> = nt.sorted_props().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["children", "email", "gender", "id", "name"]);

        let children = nt.property("children").unwrap();
        assert_eq!(children.kind(), &PropertyKind::ChildrenRel);
        assert!(children.list());
        let args = children.sorted_arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name(), "gender");
        assert_eq!(args[0].kind(), &ArgumentKind::Optional);
    }

    /// Passes if the users query takes an optional filter and returns a list
    #[test]
    fn test_generate_users_query() {
        let p = generate_users_query();

        assert_eq!(p.kind(), &PropertyKind::UsersQuery);
        assert!(p.list());
        assert_eq!(p.sorted_arguments()[0].type_name(), "UsersFilter");
    }

    /// Passes if the full description is consistent
    #[test]
    fn describe_validates() {
        let schema = describe();

        assert!(schema.validate().is_ok());
        assert_eq!(schema.type_names(), vec!["Gender", "Query", "User", "UsersFilter"]);
        assert_eq!(describe(), schema);
    }

    /// Passes if a dangling type reference is detected
    #[test]
    fn validate_missing_type() {
        let mut nthm = super::generate_schema();
        nthm.remove("UsersFilter");

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemNotFound { name }) if name == "UsersFilter"
        ));
    }

    /// Passes if a resolver reached by two fields is detected
    #[test]
    fn validate_resolver_routed_twice() {
        let mut nthm = super::generate_schema();
        let mut p = generate_users_query();
        p.name = "allUsers".to_string();
        nthm.get_mut(QUERY_TYPE)
            .unwrap()
            .props
            .insert("allUsers".to_string(), p);

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemInvalid { .. })
        ));
    }

    /// Passes if a resolver with no field is detected
    #[test]
    fn validate_resolver_unrouted() {
        let mut nthm = super::generate_schema();
        nthm.get_mut(USER_TYPE).unwrap().props.remove("children");

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemInvalid { .. })
        ));
    }

    /// Passes if a root query declared on the user type is detected
    #[test]
    fn validate_misplaced_root_query() {
        let mut nthm = super::generate_schema();
        nthm.get_mut(QUERY_TYPE).unwrap().props.remove("getUsers");
        nthm.get_mut(USER_TYPE)
            .unwrap()
            .props
            .insert("getUsers".to_string(), generate_users_query());

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemInvalid { .. })
        ));
    }

    /// Passes if an object used as an argument type is detected
    #[test]
    fn validate_object_argument() {
        let mut nthm = super::generate_schema();
        let p = Property::new("friend".to_string(), PropertyKind::Scalar, "String".to_string())
            .with_arguments(vec![Argument::new(
                "of".to_string(),
                ArgumentKind::Required,
                USER_TYPE.to_string(),
            )]);
        nthm.get_mut(USER_TYPE)
            .unwrap()
            .props
            .insert("friend".to_string(), p);

        match Schema::new(nthm).validate() {
            Err(Error::SchemaItemInvalid { name, .. }) => assert_eq!(name, "User::friend(of)"),
            other => panic!("Expected SchemaItemInvalid, found {:#?}", other),
        }
    }

    /// Passes if an input field declared on an object type is detected
    #[test]
    fn validate_input_on_object() {
        let mut nthm = super::generate_schema();
        let p = Property::new("email".to_string(), PropertyKind::Input, "String".to_string());
        nthm.get_mut(USER_TYPE)
            .unwrap()
            .props
            .insert("email".to_string(), p);

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemInvalid { name, .. }) if name == "User::email"
        ));
    }

    /// Passes if an enum with no values is detected
    #[test]
    fn validate_empty_enum() {
        let mut nthm = super::generate_schema();
        nthm.insert(
            "Gender".to_string(),
            NodeType::new("Gender".to_string(), TypeKind::Enum, HashMap::new())
                .with_enum_values(vec![]),
        );

        assert!(matches!(
            Schema::new(nthm).validate(),
            Err(Error::SchemaItemInvalid { .. })
        ));
    }

    /// Passes if the SDL rendering lists every type and field
    #[test]
    fn to_sdl() {
        let expected = "enum Gender {
  MALE
  FEMALE
  OTHER
}

type Query {
  getUser(id: String): User
  getUsers(filter: UsersFilter): [User]
}

type User {
  children(gender: Gender): [User]
  email: String
  gender: Gender
  id: String
  name: String
}

input UsersFilter {
  email: String
  gender: Gender
}
";
        assert_eq!(describe().to_sdl(), expected);
    }

    /// Passes if the description builds a Juniper root node
    #[test]
    fn test_create_root_node() {
        assert!(create_root_node(&describe()).is_ok());
    }

    /// Passes if an invalid description is refused before Juniper sees it
    #[test]
    fn create_root_node_invalid() {
        let mut nthm = super::generate_schema();
        nthm.remove("Gender");

        assert!(create_root_node(&Schema::new(nthm)).is_err());
    }

    #[test]
    fn test_schema_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
        assert_send_sync::<Info>();
    }
}
