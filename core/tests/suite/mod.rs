mod query_replacement;
