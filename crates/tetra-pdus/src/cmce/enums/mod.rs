pub mod cmce_pdu_type_dl;
