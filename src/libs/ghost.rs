use std::rc::Rc;

use crate::{
    errors::check_arguments,
    objects::{LibraryModule, LibraryModuleInner, Object},
};

pub fn ghost_lib() -> LibraryModule {
    Rc::new(
        LibraryModuleInner::new("ghost")
            .with("version", |_, args| {
                check_arguments(&args, 0)?;
                Ok(Object::from(env!("CARGO_PKG_VERSION")))
            })
            .with("directory", |ctx, args| {
                check_arguments(&args, 0)?;
                Ok(ctx
                    .envs
                    .directory()
                    .map(|dir| Object::String(dir.to_string_lossy().into()))
                    .unwrap_or_default())
            }),
    )
}
