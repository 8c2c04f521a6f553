//! Prompt templates and fixed texts for the stylist

use crate::conversation::log::ChatRole;

/// Paired marker placed around product names in stylist replies.
pub const BOLD_MARKER: &str = "**";

/// Fixed texts used by the stylist flow
pub struct StylistPromptTemplate;

impl StylistPromptTemplate {
    /// Persona and rules sent as the system-level directive.
    ///
    /// The catalog summary is appended after this preamble by the
    /// [`ContextBuilder`](super::context::ContextBuilder).
    pub fn preamble() -> &'static str {
        r#"Eres Aurelio, un experto zapatero italiano y estilista de moda de alta gama.
Tu tono es sofisticado, educado, cálido y profesional.
Tu objetivo es ayudar a los clientes a elegir el par de zapatos perfecto de nuestra colección exclusiva.

Instrucciones:
1. Responde a la consulta del usuario recomendando como máximo 2 pares de nuestro catálogo si es relevante. Menciona únicamente productos que aparezcan en el catálogo indicado más abajo.
2. Explica por qué combinan bien con la ocasión o el estilo que menciona el usuario.
3. Si el usuario pregunta algo fuera de tema, no te niegues: redirígelo suavemente a la moda y el calzado.
4. Sé conciso pero elegante. No uses listas largas.
5. Resalta los nombres de los productos en negrita rodeándolos con dobles asteriscos, por ejemplo **The Milano Oxford**."#
    }

    /// Heading placed before the catalog summary in the system directive.
    pub fn catalog_heading() -> &'static str {
        "Aquí está nuestro catálogo actual de productos:"
    }

    /// Label used when rendering a turn into the history excerpt.
    pub fn role_label(role: ChatRole) -> &'static str {
        match role {
            ChatRole::Shopper => "Cliente",
            ChatRole::Assistant => "Aurelio",
        }
    }

    /// User-turn content: history excerpt followed by the current query.
    pub fn user_turn(history: &str, query: &str) -> String {
        format!(
            "Historial de chat reciente:\n{}\n\nConsulta actual del usuario: {}",
            history, query
        )
    }

    /// Greeting that seeds every new conversation.
    pub fn greeting() -> &'static str {
        "Bienvenido a Aurelio. Soy su asistente personal de estilo. ¿Busca algo para una ocasión especial o desea mejorar su guardarropa diario?"
    }

    /// Shown when the service answered with no text.
    pub fn empty_response_fallback() -> &'static str {
        "Disculpa, no pude entender completamente tu solicitud. ¿Podrías reformularla?"
    }

    /// Shown when no credential/configuration is available.
    pub fn not_configured_fallback() -> &'static str {
        "Lo siento, no puedo conectar con el estilista en este momento. Por favor verifica tu configuración."
    }

    /// Shown when the service call failed.
    pub fn service_error_fallback() -> &'static str {
        "Ocurrió un error momentáneo con nuestro servicio de consejería. Por favor intenta de nuevo."
    }
}
