use std::marker::PhantomData;

use crate::dao::PoolType;

/// Typed handle over the shared connection pool; query impls live in `dao`,
/// one module per table.
#[derive(Debug)]
pub struct Table<T> {
    pub pool: PoolType,
    _entity: PhantomData<T>,
}

impl<T> Table<T> {
    pub fn new(pool: PoolType) -> Table<T> {
        Table {
            pool,
            _entity: PhantomData,
        }
    }
}
