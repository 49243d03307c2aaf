mod failure_idempotence;
mod hard_linked_source;
mod not_found_propagation;
