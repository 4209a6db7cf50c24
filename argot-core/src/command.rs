//! Command descriptors and the table that owns them.
//!
//! A handler's parameter types are captured statically through the
//! [`Handler`] trait, which is implemented for any `Fn` taking up to eight
//! arguments. Each registered command gets an executor monomorphized for
//! its handler's signature; converters are looked up when it runs.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::config::DuplicatePolicy;
use crate::converter::ConverterRegistry;
use crate::error::{ConfigError, DispatchError, Result};

/// A function that can be bound to a command.
///
/// `Args` is the tuple of parameter types; it only exists so that one
/// closure type can implement the trait for its single signature.
pub trait Handler<Args>: 'static {
    /// Number of positional arguments the handler consumes.
    const ARITY: usize;

    /// Type names of the parameters, in declaration order.
    fn param_types() -> Vec<&'static str>;

    /// Convert the first `ARITY` arguments and invoke the handler.
    fn call(&self, command: &str, converters: &ConverterRegistry, args: &[String]) -> Result<()>;
}

macro_rules! impl_handler {
    ($arity:literal; $($ty:ident $arg:ident),*) => {
        impl<Func, $($ty,)*> Handler<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) + 'static,
            $($ty: 'static,)*
        {
            const ARITY: usize = $arity;

            fn param_types() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$ty>()),*]
            }

            #[allow(unused_variables, irrefutable_let_patterns)]
            fn call(&self, command: &str, converters: &ConverterRegistry, args: &[String]) -> Result<()> {
                let [$($arg,)* ..] = args else {
                    return Err(DispatchError::InsufficientArguments {
                        command: command.to_string(),
                        required: Self::ARITY,
                        supplied: args.len(),
                    });
                };
                $(let $arg = converters.convert::<$ty>($arg)?;)*
                self($($arg),*);
                Ok(())
            }
        }
    };
}

impl_handler!(0;);
impl_handler!(1; A a);
impl_handler!(2; A a, B b);
impl_handler!(3; A a, B b, C c);
impl_handler!(4; A a, B b, C c, D d);
impl_handler!(5; A a, B b, C c, D d, E e);
impl_handler!(6; A a, B b, C c, D d, E e, F f);
impl_handler!(7; A a, B b, C c, D d, E e, F f, G g);
impl_handler!(8; A a, B b, C c, D d, E e, F f, G g, H h);

type Executor = Box<dyn Fn(&ConverterRegistry, &[String]) -> Result<()>>;

/// A registered command.
pub struct Command {
    name: String,
    description: String,
    arity: usize,
    param_types: Vec<&'static str>,
    executor: Executor,
}

impl Command {
    pub fn new<Args, H>(name: impl Into<String>, description: impl Into<String>, handler: H) -> Self
    where
        H: Handler<Args>,
    {
        let name = name.into();
        let bound_name = name.clone();
        Self {
            name,
            description: description.into(),
            arity: H::ARITY,
            param_types: H::param_types(),
            executor: Box::new(move |converters: &ConverterRegistry, args: &[String]| {
                handler.call(&bound_name, converters, args)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of positional arguments the command requires.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn param_types(&self) -> &[&'static str] {
        &self.param_types
    }

    /// True when at least `arity` arguments were supplied. Extra arguments are allowed.
    pub fn is_sufficient(&self, args: &[String]) -> bool {
        args.len() >= self.arity
    }

    /// Convert the arguments and run the handler. Arguments past the arity are ignored.
    pub fn execute(&self, converters: &ConverterRegistry, args: &[String]) -> Result<()> {
        (self.executor)(converters, args)
    }

    /// Name followed by the short parameter type names, e.g. `add <i32> <i32>`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for ty in &self.param_types {
            usage.push_str(" <");
            usage.push_str(short_type_name(*ty));
            usage.push('>');
        }
        usage
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arity", &self.arity)
            .field("param_types", &self.param_types)
            .finish_non_exhaustive()
    }
}

/// Strip the module path from a type name unless it is generic.
fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

/// All registered commands, keyed by name.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, Command>,
    policy: DuplicatePolicy,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            commands: BTreeMap::new(),
            policy,
        }
    }

    /// Register a handler under `name`.
    ///
    /// Converters for the handler's parameter types are not checked here;
    /// they only need to exist by the time the command is dispatched.
    pub fn register<Args, H>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> std::result::Result<(), ConfigError>
    where
        H: Handler<Args>,
    {
        let command = Command::new(name, description, handler);

        if self.commands.contains_key(command.name()) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    warn!(command = command.name(), "rejected duplicate command");
                    return Err(ConfigError::DuplicateCommand(command.name().to_string()));
                }
                DuplicatePolicy::Replace => {
                    debug!(command = command.name(), "replacing command");
                }
            }
        }

        debug!(command = command.name(), arity = command.arity(), "registered command");
        self.commands.insert(command.name().to_string(), command);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .values()
            .map(|command| (command.name(), command.description()))
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
