mod properties;
mod reconciliation;
