use serde::Serialize;

/// Characters per physical line in the group body.
pub const LINE_WIDTH: usize = 120;
pub const GROUP_COUNT: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    Numeric,
    Text,
    Settings,
    Unused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupSpec {
    pub id: u8,
    pub name: &'static str,
    pub title: &'static str,
    /// Bytes per element.
    pub width: usize,
    pub kind: GroupKind,
}

impl GroupSpec {
    /// Elements per line before a separator is expected.
    pub const fn wrap_count(&self) -> usize {
        LINE_WIDTH / self.width
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, GroupKind::Numeric)
    }
}

pub fn group_spec(id: u8) -> Option<&'static GroupSpec> {
    match id as usize {
        1..=GROUP_COUNT => Some(&GROUPS[id as usize - 1]),
        _ => None,
    }
}

pub fn find_group(name: &str) -> Option<&'static GroupSpec> {
    GROUPS.iter().find(|spec| spec.name == name)
}

macro_rules! sao_groups {
    ($(($id:literal, $name:ident, $title:literal, $width:literal, $kind:ident)),+ $(,)?) => {
        pub static GROUPS: [GroupSpec; GROUP_COUNT] = [
            $(
                GroupSpec {
                    id: $id,
                    name: stringify!($name),
                    title: $title,
                    width: $width,
                    kind: GroupKind::$kind,
                },
            )+
        ];

        impl crate::record::SAORecord {
            $(
                sao_groups!(@accessor $id, $name, $title, $kind);
            )+
        }
    };
    (@accessor $id:literal, $name:ident, $title:literal, Numeric) => {
        #[doc = concat!("Group ", stringify!($id), ": ", $title, ".")]
        pub fn $name(&self) -> &[f64] {
            self.numeric_group($id)
        }
    };
    (@accessor $id:literal, $name:ident, $title:literal, $kind:ident) => {};
}

sao_groups!(
    (1, geophysical_constants, "Geophysical constants", 7, Numeric),
    (2, system_description, "System description and operator's message", 120, Text),
    (3, sounder_settings, "Time stamp and sounder settings", 1, Settings),
    (4, scaled_characteristics, "Scaled ionospheric characteristics", 8, Numeric),
    (5, analysis_flags, "Analysis flags", 2, Numeric),
    (6, doppler_translation_table, "Doppler translation table", 7, Numeric),
    (7, o_f2_virtual_heights, "O-trace F2 layer virtual heights", 8, Numeric),
    (8, o_f2_true_heights, "O-trace F2 layer true heights", 8, Numeric),
    (9, o_f2_amplitudes, "O-trace F2 layer amplitudes", 3, Numeric),
    (10, o_f2_doppler_numbers, "O-trace F2 layer Doppler numbers", 1, Numeric),
    (11, o_f2_frequencies, "O-trace F2 layer frequencies", 8, Numeric),
    (12, o_f1_virtual_heights, "O-trace F1 layer virtual heights", 8, Numeric),
    (13, o_f1_true_heights, "O-trace F1 layer true heights", 8, Numeric),
    (14, o_f1_amplitudes, "O-trace F1 layer amplitudes", 3, Numeric),
    (15, o_f1_doppler_numbers, "O-trace F1 layer Doppler numbers", 1, Numeric),
    (16, o_f1_frequencies, "O-trace F1 layer frequencies", 8, Numeric),
    (17, o_e_virtual_heights, "O-trace E layer virtual heights", 8, Numeric),
    (18, o_e_true_heights, "O-trace E layer true heights", 8, Numeric),
    (19, o_e_amplitudes, "O-trace E layer amplitudes", 3, Numeric),
    (20, o_e_doppler_numbers, "O-trace E layer Doppler numbers", 1, Numeric),
    (21, o_e_frequencies, "O-trace E layer frequencies", 8, Numeric),
    (22, x_f2_virtual_heights, "X-trace F2 layer virtual heights", 8, Numeric),
    (23, x_f2_amplitudes, "X-trace F2 layer amplitudes", 3, Numeric),
    (24, x_f2_doppler_numbers, "X-trace F2 layer Doppler numbers", 1, Numeric),
    (25, x_f2_frequencies, "X-trace F2 layer frequencies", 8, Numeric),
    (26, x_f1_virtual_heights, "X-trace F1 layer virtual heights", 8, Numeric),
    (27, x_f1_amplitudes, "X-trace F1 layer amplitudes", 3, Numeric),
    (28, x_f1_doppler_numbers, "X-trace F1 layer Doppler numbers", 1, Numeric),
    (29, x_f1_frequencies, "X-trace F1 layer frequencies", 8, Numeric),
    (30, x_e_virtual_heights, "X-trace E layer virtual heights", 8, Numeric),
    (31, x_e_amplitudes, "X-trace E layer amplitudes", 3, Numeric),
    (32, x_e_doppler_numbers, "X-trace E layer Doppler numbers", 1, Numeric),
    (33, x_e_frequencies, "X-trace E layer frequencies", 8, Numeric),
    (34, f_echo_median_amplitudes, "Median amplitudes of F echoes", 3, Numeric),
    (35, e_echo_median_amplitudes, "Median amplitudes of E echoes", 3, Numeric),
    (36, es_echo_median_amplitudes, "Median amplitudes of Es echoes", 3, Numeric),
    (37, f2_true_height_coefficients, "F2 layer true height coefficients (UMLCAR)", 11, Numeric),
    (38, f1_true_height_coefficients, "F1 layer true height coefficients (UMLCAR)", 11, Numeric),
    (39, e_true_height_coefficients, "E layer true height coefficients (UMLCAR)", 11, Numeric),
    (40, quasi_parabolic_segments, "Quasi-parabolic segments fitted to the profile", 20, Numeric),
    (41, edit_flags, "Edit flags for characteristics", 1, Numeric),
    (42, valley_description, "Valley description", 11, Numeric),
    (43, o_es_virtual_heights, "O-trace Es layer virtual heights", 8, Numeric),
    (44, o_es_amplitudes, "O-trace Es layer amplitudes", 3, Numeric),
    (45, o_es_doppler_numbers, "O-trace Es layer Doppler numbers", 1, Numeric),
    (46, o_es_frequencies, "O-trace Es layer frequencies", 8, Numeric),
    (47, o_ea_virtual_heights, "O-trace auroral E layer virtual heights", 8, Numeric),
    (48, o_ea_amplitudes, "O-trace auroral E layer amplitudes", 3, Numeric),
    (49, o_ea_doppler_numbers, "O-trace auroral E layer Doppler numbers", 1, Numeric),
    (50, o_ea_frequencies, "O-trace auroral E layer frequencies", 8, Numeric),
    (51, true_heights, "True height profile", 8, Numeric),
    (52, plasma_frequencies, "Plasma frequency profile", 8, Numeric),
    (53, electron_densities, "Electron density profile", 8, Numeric),
    (54, ursi_qualifying_letters, "URSI qualifying letters", 1, Unused),
    (55, ursi_descriptive_letters, "URSI descriptive letters", 1, Unused),
    (56, ursi_edit_flags, "URSI edit flags for traces and profile", 1, Unused),
    (57, ea_true_height_coefficients, "Auroral E layer true height coefficients (UMLCAR)", 11, Unused),
    (58, ea_true_heights, "Auroral E layer true heights", 8, Unused),
    (59, ea_plasma_frequencies, "Auroral E layer plasma frequencies", 8, Unused),
    (60, ea_electron_densities, "Auroral E layer electron densities", 8, Unused),
);
