use crate::record::SAORecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarization {
    Ordinary,
    Extraordinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layer {
    F2,
    F1,
    E,
    Es,
    EAuroral,
}

/// Which groups hold the two sides of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// `None` for the profile, which mixes both modes.
    pub polarization: Option<Polarization>,
    /// `None` for the profile, which spans every layer.
    pub layer: Option<Layer>,
    pub frequency_group: u8,
    pub height_group: u8,
}

macro_rules! trace_specs {
    ($(($name:literal, $label:literal, $pol:ident, $layer:ident, $freq:literal, $height:literal)),+ $(,)?) => {
        pub static TRACES: &[TraceSpec] = &[
            $(
                TraceSpec {
                    name: $name,
                    label: $label,
                    polarization: Some(Polarization::$pol),
                    layer: Some(Layer::$layer),
                    frequency_group: $freq,
                    height_group: $height,
                },
            )+
        ];
    };
}

trace_specs!(
    ("o_f2", "O-trace points, F2 layer", Ordinary, F2, 11, 7),
    ("o_f1", "O-trace points, F1 layer", Ordinary, F1, 16, 12),
    ("o_e", "O-trace points, E layer", Ordinary, E, 21, 17),
    ("x_f2", "X-trace points, F2 layer", Extraordinary, F2, 25, 22),
    ("x_f1", "X-trace points, F1 layer", Extraordinary, F1, 29, 26),
    ("x_e", "X-trace points, E layer", Extraordinary, E, 33, 30),
    ("o_es", "O-trace points, Es layer", Ordinary, Es, 46, 43),
    ("o_ea", "O-trace points, auroral E layer", Ordinary, EAuroral, 50, 47),
);

/// Plasma frequency against true height.
pub static PROFILE: TraceSpec = TraceSpec {
    name: "profile",
    label: "True height profile",
    polarization: None,
    layer: None,
    frequency_group: 52,
    height_group: 51,
};

/// Frequencies (MHz) paired with heights (km) for one trace of a record.
#[derive(Debug, Clone, Copy)]
pub struct Trace<'a> {
    pub spec: &'static TraceSpec,
    pub frequencies: &'a [f64],
    pub heights: &'a [f64],
}

impl<'a> Trace<'a> {
    pub fn from_record(record: &'a SAORecord, spec: &'static TraceSpec) -> Self {
        Trace {
            spec,
            frequencies: record.numeric_group(spec.frequency_group),
            heights: record.numeric_group(spec.height_group),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty() && self.heights.is_empty()
    }

    /// Both sides carry the same number of values.
    pub fn is_consistent(&self) -> bool {
        self.frequencies.len() == self.heights.len()
    }

    pub fn points(self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.frequencies
            .iter()
            .copied()
            .zip(self.heights.iter().copied())
    }
}

impl SAORecord {
    /// Every virtual-height trace, populated or not, in plotting order.
    pub fn traces(&self) -> Vec<Trace<'_>> {
        TRACES
            .iter()
            .map(|spec| Trace::from_record(self, spec))
            .collect()
    }

    pub fn profile(&self) -> Trace<'_> {
        Trace::from_record(self, &PROFILE)
    }
}
