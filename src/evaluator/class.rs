use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{
    compiler::ast,
    environment::EnvId,
    errors::{RuntimeError, RuntimeErrorKind},
    objects::{Class, ClassInner, ClosureInner, InstanceInner, Object},
    utils::Location,
    Context,
};

const CONSTRUCTOR: &str = "constructor";

impl Context {
    pub(crate) fn eval_class(
        &mut self,
        class: &ast::Class,
        env: EnvId,
    ) -> Result<Object, RuntimeError> {
        let superclass = match &class.superclass {
            Some(expr) => match self.eval_expr(expr, env)? {
                Object::Class(superclass) => Some(superclass),
                other => {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::InvalidSuperclass(other.object_type()),
                        expr.location,
                    ))
                }
            },
            None => None,
        };
        let mut methods = IndexMap::with_hasher(FxBuildHasher);
        for method in &class.methods {
            if let Some(name) = &method.name {
                methods.insert(name.clone(), Rc::clone(method));
            }
        }
        Ok(Object::Class(Rc::new(ClassInner {
            name: class.name.clone(),
            methods,
            env,
            superclass,
        })))
    }

    /// Creates an instance and binds every method of the class chain into
    /// its field scope, each with its own `this`. Subclass methods replace
    /// inherited ones.
    pub(crate) fn instantiate(
        &mut self,
        class: Class,
        args: Vec<Object>,
        location: Location,
    ) -> Result<Object, RuntimeError> {
        log::trace!("instantiate {}", class.name);
        let fields = self.envs.child(class.env);
        let instance = Object::Instance(Rc::new(InstanceInner {
            class: Rc::clone(&class),
            fields,
        }));

        for owner in class.lineage() {
            let this_env = self.envs.child(owner.env);
            self.envs.define(this_env, "this", instance.clone());
            for (name, method) in &owner.methods {
                let closure = ClosureInner::new(Rc::clone(method), this_env);
                self.envs
                    .define(fields, name.clone(), Object::Closure(Rc::new(closure)));
            }
        }

        if class.find_method(CONSTRUCTOR).is_some() {
            if let Some(Object::Closure(constructor)) =
                self.envs.get_local(fields, CONSTRUCTOR).cloned()
            {
                self.call_closure(&constructor, args, location)?;
            }
        } else if !args.is_empty() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::NoConstructor(class.name.clone()),
                location,
            ));
        }
        Ok(instance)
    }
}
