pub mod mm_pdu_type_dl;
