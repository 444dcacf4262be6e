mod population_gate;
pub(crate) use population_gate::*;
