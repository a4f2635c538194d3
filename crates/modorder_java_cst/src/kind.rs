use is_macro::Is;

/// The node kinds the lint engine distinguishes.
///
/// Anything not listed here is [`NodeKind::Other`]; rules register interest in
/// variants of this enum rather than in raw grammar strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Is)]
pub enum NodeKind {
    Program,
    /// A modifier clause such as `public static final`.
    Modifiers,
    Annotation,
    MarkerAnnotation,
    LineComment,
    BlockComment,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    RecordDeclaration,
    AnnotationTypeDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    FieldDeclaration,
    ConstantDeclaration,
    LocalVariableDeclaration,
    /// A syntax error recovered by the parser.
    Error,
    Other,
}

impl NodeKind {
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "modifiers" => NodeKind::Modifiers,
            "annotation" => NodeKind::Annotation,
            "marker_annotation" => NodeKind::MarkerAnnotation,
            "line_comment" => NodeKind::LineComment,
            "block_comment" => NodeKind::BlockComment,
            "class_declaration" => NodeKind::ClassDeclaration,
            "interface_declaration" => NodeKind::InterfaceDeclaration,
            "enum_declaration" => NodeKind::EnumDeclaration,
            "record_declaration" => NodeKind::RecordDeclaration,
            "annotation_type_declaration" => NodeKind::AnnotationTypeDeclaration,
            "method_declaration" => NodeKind::MethodDeclaration,
            "constructor_declaration" => NodeKind::ConstructorDeclaration,
            "field_declaration" => NodeKind::FieldDeclaration,
            "constant_declaration" => NodeKind::ConstantDeclaration,
            "local_variable_declaration" => NodeKind::LocalVariableDeclaration,
            "ERROR" => NodeKind::Error,
            _ => NodeKind::Other,
        }
    }

    /// Either annotation form.
    pub fn is_any_annotation(self) -> bool {
        matches!(self, NodeKind::Annotation | NodeKind::MarkerAnnotation)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, NodeKind::LineComment | NodeKind::BlockComment)
    }

    /// Declarations that may carry `@SuppressWarnings`.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::ClassDeclaration
                | NodeKind::InterfaceDeclaration
                | NodeKind::EnumDeclaration
                | NodeKind::RecordDeclaration
                | NodeKind::AnnotationTypeDeclaration
                | NodeKind::MethodDeclaration
                | NodeKind::ConstructorDeclaration
                | NodeKind::FieldDeclaration
                | NodeKind::ConstantDeclaration
                | NodeKind::LocalVariableDeclaration
        )
    }
}
