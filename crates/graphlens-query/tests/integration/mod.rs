mod pipeline;
mod rendering;
mod search_failures;
