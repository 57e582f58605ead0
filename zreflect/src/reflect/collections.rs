//! Reflect implementations for collection types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

impl_sequence!(Vec<T>);
impl_sequence!(VecDeque<T>);
impl_sequence!(BTreeSet<T>);
impl_sequence!(HashSet<T>);

impl_map!(HashMap<String, V>);
impl_map!(BTreeMap<String, V>);
impl_map!(IndexMap<String, V>);
