mod send_query;

pub use send_query::SendQueryUseCase;
