//! Contains the input and node data structures that Juniper uses to expose the schema
//! description. Both are dynamic types: their GraphQL shape is read from the [`Info`] passed in
//! at schema build time, and each field resolves according to its [`PropertyKind`].
//!
//! [`Info`]: ../schema/struct.Info.html
//! [`PropertyKind`]: ../schema/enum.PropertyKind.html

use super::context::GraphQLContext;
use super::filter::UsersFilter;
use super::resolvers::{resolve_all, resolve_by_id, resolve_children};
use super::schema::{Argument, ArgumentKind, Info, NodeType, PropertyKind, GENDER_TYPE};
use super::store::{Gender, User};
use super::value::Value;
use crate::error::Error;
use juniper::meta::MetaType;
use juniper::{
    Arguments, DefaultScalarValue, ExecutionResult, Executor, FromInputValue, GraphQLType,
    GraphQLValue, InputValue, Registry, Selection, ID,
};
use log::{debug, error, trace};
use std::convert::TryFrom;
use std::panic::panic_any;
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Input {
    value: Value,
}

impl Input {
    fn new(value: Value) -> Input {
        Input { value }
    }
}

impl FromInputValue for Input {
    fn from_input_value(v: &InputValue) -> Option<Self> {
        serde_json::to_value(v)
            .ok()
            .and_then(|val| Value::try_from(val).ok())
            .map(Input::new)
    }
}

impl GraphQLType for Input {
    fn name(info: &Self::TypeInfo) -> Option<&str> {
        Some(info.name())
    }

    fn meta<'r>(info: &Self::TypeInfo, registry: &mut Registry<'r>) -> MetaType<'r>
    where
        DefaultScalarValue: 'r,
    {
        trace!("Input::meta called for {}", info.name());

        let nt = info.type_def().unwrap_or_else(|e| {
            // this path is only reached if the schema description failed to validate
            error!(
                "Input::meta expected type '{}' that was not found in GraphQL schema",
                info.name()
            );
            panic_any(e)
        });

        let args = nt
            .sorted_props()
            .iter()
            .map(|p| match (p.type_name(), p.list()) {
                ("ID", false) => registry.arg::<Option<ID>>(p.name(), &()),
                ("ID", true) => registry.arg::<Option<Vec<ID>>>(p.name(), &()),
                ("String", false) => registry.arg::<Option<String>>(p.name(), &()),
                ("String", true) => registry.arg::<Option<Vec<String>>>(p.name(), &()),
                (GENDER_TYPE, false) => registry.arg::<Option<Gender>>(p.name(), &()),
                (GENDER_TYPE, true) => registry.arg::<Option<Vec<Gender>>>(p.name(), &()),
                (_, false) => registry.arg::<Option<Input>>(
                    p.name(),
                    &Info::new(p.type_name().to_string(), info.type_defs()),
                ),
                (_, true) => registry.arg::<Option<Vec<Input>>>(
                    p.name(),
                    &Info::new(p.type_name().to_string(), info.type_defs()),
                ),
            })
            .collect::<Vec<_>>();

        registry
            .build_input_object_type::<Input>(info, &args)
            .into_meta()
    }
}

impl GraphQLValue for Input {
    type Context = GraphQLContext;
    type TypeInfo = Info;

    fn type_name<'i>(&self, info: &'i Self::TypeInfo) -> Option<&'i str> {
        Some(info.name())
    }
}

/// Represents an object of the GraphQL schema: either the root query object, which has no user,
/// or a user.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    concrete_typename: String,
    user_opt: Option<Arc<User>>,
}

impl Node {
    pub(crate) fn root() -> Node {
        Node {
            concrete_typename: super::schema::QUERY_TYPE.to_string(),
            user_opt: None,
        }
    }

    fn from_user(user: Arc<User>) -> Node {
        Node {
            concrete_typename: super::schema::USER_TYPE.to_string(),
            user_opt: Some(user),
        }
    }

    fn user(&self, field_name: &str) -> Result<&User, Error> {
        self.user_opt
            .as_deref()
            .ok_or_else(|| Error::ResponseItemNotFound {
                name: self.concrete_typename.to_string() + "::" + field_name,
            })
    }

    fn attribute(&self, field_name: &str) -> Result<&str, Error> {
        let user = self.user(field_name)?;
        match field_name {
            "id" => Ok(user.id()),
            "name" => Ok(user.name()),
            "email" => Ok(user.email()),
            _ => Err(Error::ResponseItemNotFound {
                name: field_name.to_string(),
            }),
        }
    }

    fn object_meta<'r>(nt: &NodeType, info: &Info, registry: &mut Registry<'r>) -> MetaType<'r>
    where
        DefaultScalarValue: 'r,
    {
        trace!("Node::object_meta -- nt.type_name(): {}", nt.type_name());

        let fields = nt
            .sorted_props()
            .iter()
            .map(|p| {
                let f = match (p.type_name(), p.list()) {
                    ("ID", false) => registry.field::<Option<ID>>(p.name(), &()),
                    ("ID", true) => registry.field::<Option<Vec<ID>>>(p.name(), &()),
                    ("String", false) => registry.field::<Option<String>>(p.name(), &()),
                    ("String", true) => registry.field::<Option<Vec<String>>>(p.name(), &()),
                    (GENDER_TYPE, false) => registry.field::<Option<Gender>>(p.name(), &()),
                    (GENDER_TYPE, true) => registry.field::<Option<Vec<Gender>>>(p.name(), &()),
                    (_, false) => registry.field::<Option<Node>>(
                        p.name(),
                        &Info::new(p.type_name().to_string(), info.type_defs()),
                    ),
                    (_, true) => registry.field::<Option<Vec<Node>>>(
                        p.name(),
                        &Info::new(p.type_name().to_string(), info.type_defs()),
                    ),
                };

                p.sorted_arguments()
                    .into_iter()
                    .fold(f, |f, arg| f.argument(argument_meta(arg, info, registry)))
            })
            .collect::<Vec<_>>();

        registry
            .build_object_type::<Node>(info, &fields)
            .into_meta()
    }
}

fn argument_meta<'r>(
    arg: &Argument,
    info: &Info,
    registry: &mut Registry<'r>,
) -> juniper::meta::Argument<'r, DefaultScalarValue> {
    match (arg.type_name(), arg.kind()) {
        ("ID", ArgumentKind::Optional) => registry.arg::<Option<ID>>(arg.name(), &()),
        ("ID", ArgumentKind::Required) => registry.arg::<ID>(arg.name(), &()),
        ("String", ArgumentKind::Optional) => registry.arg::<Option<String>>(arg.name(), &()),
        ("String", ArgumentKind::Required) => registry.arg::<String>(arg.name(), &()),
        (GENDER_TYPE, ArgumentKind::Optional) => registry.arg::<Option<Gender>>(arg.name(), &()),
        (GENDER_TYPE, ArgumentKind::Required) => registry.arg::<Gender>(arg.name(), &()),
        (type_name, ArgumentKind::Optional) => registry.arg::<Option<Input>>(
            arg.name(),
            &Info::new(type_name.to_string(), info.type_defs()),
        ),
        (type_name, ArgumentKind::Required) => registry.arg::<Input>(
            arg.name(),
            &Info::new(type_name.to_string(), info.type_defs()),
        ),
    }
}

impl GraphQLType for Node {
    fn name(info: &Self::TypeInfo) -> Option<&str> {
        Some(info.name())
    }

    fn meta<'r>(info: &Self::TypeInfo, registry: &mut Registry<'r>) -> MetaType<'r>
    where
        DefaultScalarValue: 'r,
    {
        trace!("Node::meta called -- info.name: {}", info.name());
        let nt = info.type_def().unwrap_or_else(|e| {
            error!("Node::meta panicking on type: {}", info.name());
            panic_any(e)
        });

        Node::object_meta(nt, info, registry)
    }
}

impl GraphQLValue for Node {
    type Context = GraphQLContext;
    type TypeInfo = Info;

    fn type_name<'i>(&self, info: &'i Self::TypeInfo) -> Option<&'i str> {
        Some(info.name())
    }

    fn concrete_type_name(&self, _context: &Self::Context, _info: &Self::TypeInfo) -> String {
        self.concrete_typename.to_string()
    }

    fn resolve_field(
        &self,
        info: &Self::TypeInfo,
        field_name: &str,
        args: &Arguments,
        executor: &Executor<Self::Context>,
    ) -> ExecutionResult {
        trace!(
            "Node::resolve_field called -- info.name: {}, field_name: {}",
            info.name(),
            field_name,
        );

        let p = info.type_def()?.property(field_name)?;
        let store = executor.context().store();
        let dst_info = Info::new(p.type_name().to_string(), info.type_defs());

        let result = match p.kind() {
            PropertyKind::UsersQuery => {
                let filter_opt = args
                    .get::<Option<Input>>("filter")
                    .flatten()
                    .map(|input| UsersFilter::try_from(&input.value))
                    .transpose()?;
                let nodes = resolve_all(store, filter_opt.as_ref())
                    .into_iter()
                    .map(Node::from_user)
                    .collect::<Vec<Node>>();
                executor.resolve(&dst_info, &nodes)
            }
            PropertyKind::UserQuery => {
                let node_opt = match args.get::<Option<String>>("id").flatten() {
                    Some(id) => resolve_by_id(store, &id).map(Node::from_user),
                    None => {
                        debug!("Node::resolve_field -- {} called without id", field_name);
                        None
                    }
                };
                executor.resolve(&dst_info, &node_opt)
            }
            PropertyKind::ChildrenRel => {
                let gender_opt = args.get::<Option<Gender>>("gender").flatten();
                let nodes = resolve_children(store, self.user(field_name)?, gender_opt)
                    .into_iter()
                    .map(Node::from_user)
                    .collect::<Vec<Node>>();
                executor.resolve(&dst_info, &nodes)
            }
            PropertyKind::Enum => {
                executor.resolve_with_ctx(&(), &self.user(field_name)?.gender())
            }
            PropertyKind::Scalar => {
                executor.resolve_with_ctx(&(), &self.attribute(field_name)?.to_string())
            }
            PropertyKind::Input => Err(Error::SchemaItemInvalid {
                name: info.name().to_string() + "::" + field_name,
                reason: "input fields do not resolve".to_string(),
            }
            .into()),
        };

        trace!("Node::resolve_field -- result: {:#?}", result);

        result
    }

    fn resolve_into_type(
        &self,
        info: &Self::TypeInfo,
        type_name: &str,
        selection_set: Option<&[Selection]>,
        executor: &Executor<Self::Context>,
    ) -> ExecutionResult {
        trace!(
            "Node::resolve_into_type called -- info.name: {}, type_name: {}",
            info.name(),
            type_name,
        );

        // fragments on another type resolve to nothing
        if info.name() != type_name {
            return Ok(juniper::Value::Null);
        }

        self.resolve(info, selection_set, executor)
    }
}
