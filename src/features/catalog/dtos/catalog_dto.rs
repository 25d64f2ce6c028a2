use serde::{Deserialize, Serialize};

/// Zone grouping machines, first-level classification of an anomaly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bloc {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Equipment belonging to exactly one bloc
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub bloc_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Machine as the backend serializes it: either a flat `blocId` or the
/// owning bloc nested as `bloc: {id, ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bloc_id: Option<i64>,
    #[serde(default)]
    pub bloc: Option<BlocRefDto>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocRefDto {
    pub id: i64,
}

impl MachineDto {
    /// Resolve the owning bloc, using `requested_bloc_id` when the body omits it
    pub fn into_machine(self, requested_bloc_id: i64) -> Machine {
        let bloc_id = self
            .bloc_id
            .or(self.bloc.map(|b| b.id))
            .unwrap_or(requested_bloc_id);

        Machine {
            id: self.id,
            name: self.name,
            bloc_id,
            description: self.description,
        }
    }
}

impl<'de> Deserialize<'de> for Machine {
    /// Bodies without any bloc reference are rejected here; per-bloc
    /// listings go through `MachineDto::into_machine` instead
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dto = MachineDto::deserialize(deserializer)?;
        let bloc_id = dto
            .bloc_id
            .or(dto.bloc.as_ref().map(|b| b.id))
            .ok_or_else(|| serde::de::Error::missing_field("blocId"))?;
        Ok(dto.into_machine(bloc_id))
    }
}
