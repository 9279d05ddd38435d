pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";

pub(crate) const ERR_EMPTY_HANDLE: &str =
    "dereferenced a handle from a lookup that did not succeed";
