use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Attorney {
    #[schema(example = "Magna Barbosa")]
    pub nome: String,
    /// OAB registration number
    #[schema(example = "26.600")]
    pub oab: String,
    #[schema(example = "(81) 99999-9999")]
    pub telefone: String,
    #[schema(example = "magna@advogados.com")]
    pub email: String,
    #[schema(example = "12345678901")]
    pub cpf: String,
    pub endereco: String,
    #[schema(example = "brasileira")]
    pub nacionalidade: String,
    /// Honorific used in documents (DR, DRA)
    #[schema(example = "DRA")]
    pub tratamento: String,
}
