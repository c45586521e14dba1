use std::collections::HashMap;

use super::ErrorKind;

/// Ajustes configurables por kind de error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSettings {
    /// Código de estado que usa el transporte al renderizar.
    pub status: u16,
    /// Si es `false`, un error de este kind lanzado por una acción anidada se
    /// convierte a `Internal` antes de llegar al caller.
    pub visible_when_nested: bool,
    /// Si es `false`, el writer no renderiza el detalle: el error se entrega
    /// al error hook del handler y se emite una respuesta genérica.
    pub render: bool,
}

/// Política de errores del runtime (status + visibilidad por kind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPolicy {
    kinds: HashMap<ErrorKind, KindSettings>,
}

impl ErrorPolicy {
    pub fn settings(&self, kind: ErrorKind) -> KindSettings {
        self.kinds.get(&kind).copied().unwrap_or(KindSettings { status: 500,
                                                                visible_when_nested: true,
                                                                render: false })
    }

    pub fn set(&mut self, kind: ErrorKind, settings: KindSettings) {
        self.kinds.insert(kind, settings);
    }

    pub fn with(mut self, kind: ErrorKind, settings: KindSettings) -> Self {
        self.set(kind, settings);
        self
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        let mut kinds = HashMap::new();
        kinds.insert(ErrorKind::ValidationFail,
                     KindSettings { status: 400,
                                    visible_when_nested: false,
                                    render: true });
        kinds.insert(ErrorKind::Conflict,
                     KindSettings { status: 409,
                                    visible_when_nested: true,
                                    render: true });
        kinds.insert(ErrorKind::NotFound,
                     KindSettings { status: 404,
                                    visible_when_nested: true,
                                    render: true });
        kinds.insert(ErrorKind::NoContent,
                     KindSettings { status: 204,
                                    visible_when_nested: true,
                                    render: true });
        kinds.insert(ErrorKind::Internal,
                     KindSettings { status: 500,
                                    visible_when_nested: true,
                                    render: false });
        Self { kinds }
    }
}
