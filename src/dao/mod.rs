pub use postgre::{get_path, DBRow, DataBase, PoolOption, PoolType, QueryResult};

mod postgre;
