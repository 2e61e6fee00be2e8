use serde::{Deserialize, Serialize};

/// A hardware stock-keeping unit (hinge, slide, handle, ...)
/// This is the root entity for all stock tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ferragem {
    /// Server-assigned opaque identifier
    pub id: String,

    /// Kind of hardware ("Dobradiça", "Corrediça", ...)
    pub tipo: String,

    /// Manufacturer ("Hafele", "Blum", ...)
    pub marca: String,

    /// Units on hand. Unsigned, so a negative stock level is
    /// unrepresentable by construction
    pub quantidade: u32,

    /// Catalog category
    pub categoria: String,
}

impl Ferragem {
    pub fn new(id: String, tipo: String, marca: String, quantidade: u32, categoria: String) -> Self {
        Self {
            id,
            tipo,
            marca,
            quantidade,
            categoria,
        }
    }
}

impl std::fmt::Display for Ferragem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.tipo, self.marca)
    }
}
